use serde::{Deserialize, Serialize};

use super::super::domain::RuleType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    Yes,
    Likely,
    Unclear,
}

impl Eligibility {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::Likely => "Likely",
            Self::Unclear => "Unclear",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerField {
    Operation,
    Scale,
    Location,
    Practice,
    LandControl,
    ComplianceId,
}

impl AnswerField {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Operation,
            Self::Scale,
            Self::Location,
            Self::Practice,
            Self::LandControl,
            Self::ComplianceId,
        ]
    }

    pub const fn required() -> [Self; 4] {
        [Self::Operation, Self::Scale, Self::Location, Self::Practice]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Operation => "Operation type",
            Self::Scale => "Operation scale",
            Self::Location => "Location",
            Self::Practice => "Planned practice",
            Self::LandControl => "Land control",
            Self::ComplianceId => "Compliance records ID",
        }
    }
}

/// Wizard answers. Every field starts empty and fills in as the farmer works
/// through the form, so partial payloads deserialize cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityAnswers {
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub scale: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub practice: String,
    #[serde(default)]
    pub land_control: String,
    #[serde(default)]
    pub compliance_id: String,
}

impl EligibilityAnswers {
    fn value(&self, field: AnswerField) -> &str {
        match field {
            AnswerField::Operation => &self.operation,
            AnswerField::Scale => &self.scale,
            AnswerField::Location => &self.location,
            AnswerField::Practice => &self.practice,
            AnswerField::LandControl => &self.land_control,
            AnswerField::ComplianceId => &self.compliance_id,
        }
    }

    pub fn set(&mut self, field: AnswerField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AnswerField::Operation => self.operation = value,
            AnswerField::Scale => self.scale = value,
            AnswerField::Location => self.location = value,
            AnswerField::Practice => self.practice = value,
            AnswerField::LandControl => self.land_control = value,
            AnswerField::ComplianceId => self.compliance_id = value,
        }
    }

    /// The result unlocks once the four core questions are answered.
    pub fn is_complete(&self) -> bool {
        AnswerField::required()
            .into_iter()
            .all(|field| !self.value(field).is_empty())
    }

    pub fn missing(&self) -> Vec<&'static str> {
        AnswerField::required()
            .into_iter()
            .filter(|field| self.value(*field).is_empty())
            .map(AnswerField::label)
            .collect()
    }

    /// Optional follow-ups gate the plan actions, never the result itself.
    pub fn plan_actions_enabled(&self) -> bool {
        !self.land_control.is_empty() && !self.compliance_id.is_empty()
    }
}

/// Outcome of an eligibility check against the country rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityResult {
    pub eligible: Eligibility,
    pub program: &'static str,
    pub cost_share: &'static str,
    pub cap: &'static str,
    pub rule_type: RuleType,
    pub next_date: &'static str,
    pub checklist: Vec<&'static str>,
}

impl EligibilityResult {
    pub fn to_view(&self) -> EligibilityView {
        EligibilityView {
            eligible: self.eligible,
            eligible_label: self.eligible.label(),
            program: self.program,
            cost_share: self.cost_share,
            cap: self.cap,
            rule_type: self.rule_type,
            rule_type_label: self.rule_type.label(),
            next_date: self.next_date,
            checklist: self.checklist.clone(),
        }
    }
}

/// Presentation twin of [`EligibilityResult`] with labels resolved for clients.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityView {
    pub eligible: Eligibility,
    pub eligible_label: &'static str,
    pub program: &'static str,
    pub cost_share: &'static str,
    pub cap: &'static str,
    pub rule_type: RuleType,
    pub rule_type_label: &'static str,
    pub next_date: &'static str,
    pub checklist: Vec<&'static str>,
}
