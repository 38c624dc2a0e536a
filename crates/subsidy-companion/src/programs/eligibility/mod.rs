//! Rough eligibility screening for the wizard.
//!
//! The screen is deliberately optimistic: once the four core questions are
//! answered it reports `Likely` and points at the country's headline program.
//! Real determinations belong to the agency intake process, so nothing here
//! ever denies an applicant.

pub mod domain;
pub mod pack;

use super::rules::lookup_program;

pub use domain::{
    AnswerField, Eligibility, EligibilityAnswers, EligibilityResult, EligibilityView,
};
pub use pack::{
    assemble_pack, ExportDispatcher, ExportError, ExportJob, ExportMethod, ExportReceipt,
    PackExportRequest, SubmissionPack,
};

/// Cost-share band quoted for every headline program.
pub const COST_SHARE_RANGE: &str = "50-75%";

/// Payment cap band quoted for every headline program.
pub const PAYMENT_CAP_RANGE: &str = "$15,000-$40,000";

/// Documents every submission pack asks the farmer to gather.
pub const DOCUMENT_CHECKLIST: [&str; 3] = [
    "Proof of land control (deed, lease, or operating agreement)",
    "Farm and tract numbers from your local service center",
    "Records for the planned practice area (maps, acreage, current condition)",
];

/// Evaluate the wizard answers, or `None` while required answers are missing.
pub fn evaluate(answers: &EligibilityAnswers) -> Option<EligibilityResult> {
    if !answers.is_complete() {
        return None;
    }

    let rule = lookup_program(&answers.location);

    Some(EligibilityResult {
        eligible: Eligibility::Likely,
        program: rule.program,
        cost_share: COST_SHARE_RANGE,
        cap: PAYMENT_CAP_RANGE,
        rule_type: rule.rule_type,
        next_date: rule.next_date,
        checklist: DOCUMENT_CHECKLIST.to_vec(),
    })
}
