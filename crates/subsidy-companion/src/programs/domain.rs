use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    RankingCutoff,
    ContinuousSignup,
}

impl RuleType {
    pub const fn ordered() -> [Self; 2] {
        [Self::RankingCutoff, Self::ContinuousSignup]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RankingCutoff => "Ranking cutoff",
            Self::ContinuousSignup => "Continuous signup",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Deadline,
    Priority,
    Newest,
}

impl SortKey {
    pub const fn ordered() -> [Self; 3] {
        [Self::Deadline, Self::Priority, Self::Newest]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Deadline => "Closest deadline",
            Self::Priority => "High priority first",
            Self::Newest => "Newest first",
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::Deadline
    }
}

/// Catalog entry as returned by the upstream program feeds. Optional fields
/// stay optional all the way to the view layer, where placeholders take over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramRecord {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub published_date: NaiveDate,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub data_source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_agency: Option<String>,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunity_number: Option<String>,
    #[serde(default)]
    pub is_high_priority: bool,
}

/// Aggregate counters for the catalog overview strip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramStats {
    pub total_programs: usize,
    pub active_programs: usize,
    pub expired_programs: usize,
    pub high_priority: usize,
    pub upcoming_deadlines: usize,
    #[serde(default)]
    pub by_country: BTreeMap<String, usize>,
    #[serde(default)]
    pub by_source: BTreeMap<String, usize>,
    #[serde(default)]
    pub by_category: BTreeMap<String, usize>,
}
