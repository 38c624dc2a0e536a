//! Wizard session state: which page the farmer is on, the answers collected
//! so far, and the assistant drawer.

mod assistant;

use serde::{Deserialize, Serialize};

use crate::programs::eligibility::pack::{assemble_pack, SubmissionPack};
use crate::programs::eligibility::{evaluate, AnswerField, EligibilityAnswers, EligibilityResult};
use crate::programs::practices::PracticeCatalog;

pub use assistant::assistant_tips;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Eligibility,
    Practices,
    Submission,
    Deadlines,
    Help,
}

impl Page {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Home,
            Self::Eligibility,
            Self::Practices,
            Self::Submission,
            Self::Deadlines,
            Self::Help,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Eligibility => "Eligibility check",
            Self::Practices => "Practices",
            Self::Submission => "Submission pack",
            Self::Deadlines => "Deadlines",
            Self::Help => "Help",
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::Home
    }
}

/// Prompt rendered when the submission page is opened before the screen ran.
pub const SUBMISSION_EMPTY_PROMPT: &str =
    "Complete the eligibility check and pick a practice to assemble your submission pack.";

/// What the submission page renders for the current session.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionView {
    Ready(Box<SubmissionPack>),
    Empty {
        prompt: &'static str,
        redirect: Page,
    },
}

/// One farmer's pass through the wizard. Pages are reachable in any order;
/// answers persist across navigation until the session is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardSession {
    current: Page,
    assistant_open: bool,
    answers: EligibilityAnswers,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_page(&self) -> Page {
        self.current
    }

    /// Direct navigation; there is no page ordering to enforce.
    pub fn go_to(&mut self, page: Page) -> Page {
        self.current = page;
        self.current
    }

    pub fn toggle_assistant(&mut self) -> bool {
        self.assistant_open = !self.assistant_open;
        self.assistant_open
    }

    pub fn assistant_open(&self) -> bool {
        self.assistant_open
    }

    pub fn answer(&mut self, field: AnswerField, value: impl Into<String>) {
        self.answers.set(field, value);
    }

    pub fn answers(&self) -> &EligibilityAnswers {
        &self.answers
    }

    /// Re-runs the screen on every call; `None` while answers are incomplete.
    pub fn evaluation(&self) -> Option<EligibilityResult> {
        evaluate(&self.answers)
    }

    pub fn submission_view(&self, practices: &PracticeCatalog) -> SubmissionView {
        match self.evaluation() {
            Some(result) => {
                SubmissionView::Ready(Box::new(assemble_pack(&self.answers, &result, practices)))
            }
            None => SubmissionView::Empty {
                prompt: SUBMISSION_EMPTY_PROMPT,
                redirect: Page::Eligibility,
            },
        }
    }

    pub fn tips(&self, upcoming_deadlines: usize) -> Vec<String> {
        assistant_tips(self.current, &self.answers, upcoming_deadlines)
    }
}
