use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::practices::PracticeCatalog;
use super::super::rules::ProgramCountry;
use super::domain::{EligibilityAnswers, EligibilityResult, EligibilityView};

/// Printable bundle handed to the farmer once the screen comes back positive.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPack {
    pub country_label: &'static str,
    pub eligibility: EligibilityView,
    pub practice_name: String,
    pub practice_plan: Vec<&'static str>,
    pub actions_enabled: bool,
}

/// Plan shown when the selected practice is not in the standard catalog.
const GENERIC_PRACTICE_PLAN: [&str; 2] = [
    "Review the planned practice with your local office technician before enrollment.",
    "Bring maps and acreage for the treatment area to the planning visit.",
];

pub fn assemble_pack(
    answers: &EligibilityAnswers,
    result: &EligibilityResult,
    practices: &PracticeCatalog,
) -> SubmissionPack {
    let (practice_name, practice_plan) = match practices.find(&answers.practice) {
        Some(template) => (template.name.to_string(), template.plan.clone()),
        None => (answers.practice.clone(), GENERIC_PRACTICE_PLAN.to_vec()),
    };

    SubmissionPack {
        country_label: ProgramCountry::from_territory(&answers.location).label(),
        eligibility: result.to_view(),
        practice_name,
        practice_plan,
        actions_enabled: answers.plan_actions_enabled(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMethod {
    Print,
    Download,
    Email,
    Sms,
}

impl ExportMethod {
    pub const fn ordered() -> [Self; 4] {
        [Self::Print, Self::Download, Self::Email, Self::Sms]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Print => "Print",
            Self::Download => "Download",
            Self::Email => "Email",
            Self::Sms => "Text message",
        }
    }

    pub const fn requires_contact(self) -> bool {
        matches!(self, Self::Email | Self::Sms)
    }
}

/// Client request to send the assembled pack somewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackExportRequest {
    pub method: ExportMethod,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
}

impl PackExportRequest {
    /// Contact rules per method. Print and download never need a contact.
    pub fn validate(&self) -> Result<(), ExportError> {
        let contact = self.contact.as_deref().unwrap_or("").trim();
        match self.method {
            ExportMethod::Print | ExportMethod::Download => Ok(()),
            ExportMethod::Email if looks_like_email(contact) => Ok(()),
            ExportMethod::Email => Err(ExportError::InvalidContact {
                method: self.method.label(),
                reason: "enter an email address such as name@example.org",
            }),
            ExportMethod::Sms if contact.chars().count() >= 10 => Ok(()),
            ExportMethod::Sms => Err(ExportError::InvalidContact {
                method: self.method.label(),
                reason: "enter a phone number with at least 10 digits",
            }),
        }
    }

    pub fn into_job(self) -> Result<ExportJob, ExportError> {
        self.validate()?;

        let subject = match &self.program {
            Some(program) => format!("Submission pack - {program}"),
            None => "Submission pack".to_string(),
        };
        let contact = self
            .contact
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Ok(ExportJob {
            method: self.method,
            contact,
            subject,
            details: BTreeMap::new(),
        })
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Dispatch payload so routes and tests can assert the integration boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportJob {
    pub method: ExportMethod,
    pub contact: Option<String>,
    pub subject: String,
    pub details: BTreeMap<String, String>,
}

/// Acknowledgement returned to the client once a job is queued.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReceipt {
    pub method: ExportMethod,
    pub method_label: &'static str,
    pub subject: String,
}

impl ExportReceipt {
    pub fn for_job(job: &ExportJob) -> Self {
        Self {
            method: job.method,
            method_label: job.method.label(),
            subject: job.subject.clone(),
        }
    }
}

/// Trait describing outbound delivery hooks (printer queue, mail relay, SMS gateway).
pub trait ExportDispatcher: Send + Sync {
    fn dispatch(&self, job: ExportJob) -> Result<(), ExportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("{method} export needs a valid contact: {reason}")]
    InvalidContact {
        method: &'static str,
        reason: &'static str,
    },
    #[error("export transport unavailable: {0}")]
    Transport(String),
}
