use serde::Serialize;

/// Conservation practice offered by the wizard, with the implementation steps
/// that land in the submission pack.
#[derive(Debug, Clone, Serialize)]
pub struct PracticeTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub plan: Vec<&'static str>,
}

#[derive(Debug)]
pub struct PracticeCatalog {
    practices: Vec<PracticeTemplate>,
}

impl PracticeCatalog {
    pub fn standard() -> Self {
        Self {
            practices: standard_practice_templates(),
        }
    }

    pub fn templates(&self) -> &[PracticeTemplate] {
        &self.practices
    }

    /// Lookup tolerates the raw form values the wizard collects, so
    /// `Cover Crops` and `cover-crops` resolve to the same template.
    pub fn find(&self, key: &str) -> Option<&PracticeTemplate> {
        let wanted = normalize_key(key);
        self.practices
            .iter()
            .find(|practice| practice.key == wanted)
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn standard_practice_templates() -> Vec<PracticeTemplate> {
    vec![
        PracticeTemplate {
            key: "soil-health",
            name: "Soil Health Management",
            summary: "Build organic matter and reduce erosion through a multi-year soil health plan.",
            plan: vec![
                "Pull baseline soil samples for every field entering the plan and archive the lab results.",
                "Select at least two soil health practices (reduced tillage, cover, amendments) with your technician.",
                "Schedule annual re-sampling so payment rates can be trued up against measured improvement.",
            ],
        },
        PracticeTemplate {
            key: "cover-crops",
            name: "Cover Crops",
            summary: "Seed covers after cash-crop harvest to hold nutrients and soil over winter.",
            plan: vec![
                "Pick a species mix compatible with your cash-crop herbicide program.",
                "Document planned seeding dates, rates, and termination method per field.",
                "Keep seed tags and application receipts; they are required at payment time.",
            ],
        },
        PracticeTemplate {
            key: "no-till",
            name: "No-Till Transition",
            summary: "Move tilled acres to continuous no-till or strip-till systems.",
            plan: vec![
                "Identify the fields converting this season and note their current tillage passes.",
                "Line up planter attachments or custom seeding before the enrollment visit.",
                "Record residue cover after planting as the practice verification evidence.",
            ],
        },
        PracticeTemplate {
            key: "nutrient-management",
            name: "Nutrient Management",
            summary: "Apply the right nutrient source at the right rate, time, and place.",
            plan: vec![
                "Assemble current soil tests, yield maps, and manure analyses for the planner.",
                "Work with a certified planner to set field-by-field rate prescriptions.",
                "Log every application date and rate through the season for the annual review.",
            ],
        },
        PracticeTemplate {
            key: "rotational-grazing",
            name: "Rotational Grazing",
            summary: "Split pastures into paddocks and rest forage on a planned rotation.",
            plan: vec![
                "Sketch the paddock layout with water access for each grazing cell.",
                "Price fencing and watering infrastructure for the cost-share estimate.",
                "Draft the grazing calendar showing rest periods for each paddock.",
            ],
        },
        PracticeTemplate {
            key: "irrigation-efficiency",
            name: "Irrigation Efficiency",
            summary: "Upgrade to higher-efficiency irrigation hardware and scheduling.",
            plan: vec![
                "Have the current system audited so savings can be quantified in the application.",
                "Collect quotes for the upgraded hardware from at least two suppliers.",
                "Plan flow metering so post-upgrade water use can be reported.",
            ],
        },
    ]
}
