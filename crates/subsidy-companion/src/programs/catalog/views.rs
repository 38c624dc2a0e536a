use chrono::NaiveDate;
use serde::Serialize;

use super::super::domain::{ProgramRecord, ProgramStats, RuleType};
use super::super::rules::ProgramCountry;

/// Shown when a record carries no deadline.
pub const MISSING_DEADLINE_PLACEHOLDER: &str = "Contact local office";

/// Shown when a record carries no funding amount.
pub const MISSING_FUNDING_PLACEHOLDER: &str = "Varies by program";

/// Shown when a record carries no location.
pub const MISSING_LOCATION_PLACEHOLDER: &str = "Nationwide";

/// Deadlines flip to `ClosingSoon` inside this many days.
pub const CLOSING_SOON_WINDOW_DAYS: i64 = 14;

/// Deadlines inside this many days count toward the stats strip.
pub const UPCOMING_WINDOW_DAYS: i64 = 30;

/// Catalog card with every optional field resolved to display text.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramCardView {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub funding_display: String,
    pub deadline_display: String,
    pub location_display: String,
    pub data_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_agency: Option<String>,
    pub country: String,
    pub url: String,
    pub high_priority: bool,
}

pub fn card_view(record: &ProgramRecord) -> ProgramCardView {
    ProgramCardView {
        id: record.id.clone(),
        title: record.title.clone(),
        summary: record.summary.clone(),
        category: record.category.clone(),
        funding_display: record
            .funding_amount
            .clone()
            .unwrap_or_else(|| MISSING_FUNDING_PLACEHOLDER.to_string()),
        deadline_display: record
            .deadline
            .map(format_long_date)
            .unwrap_or_else(|| MISSING_DEADLINE_PLACEHOLDER.to_string()),
        location_display: record
            .location
            .clone()
            .unwrap_or_else(|| MISSING_LOCATION_PLACEHOLDER.to_string()),
        data_source: record.data_source.clone(),
        source_agency: record.source_agency.clone(),
        country: record.country.clone(),
        url: record.url.clone(),
        high_priority: record.is_high_priority,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineKind {
    Ranking,
    Signup,
}

impl DeadlineKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ranking => "Ranking",
            Self::Signup => "Signup",
        }
    }
}

impl From<RuleType> for DeadlineKind {
    fn from(rule_type: RuleType) -> Self {
        match rule_type {
            RuleType::RankingCutoff => Self::Ranking,
            RuleType::ContinuousSignup => Self::Signup,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineStatus {
    Open,
    ClosingSoon,
    Unknown,
}

impl DeadlineStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::ClosingSoon => "Closing soon",
            Self::Unknown => "Unknown",
        }
    }
}

/// Row for the deadline board.
#[derive(Debug, Clone, Serialize)]
pub struct DeadlineViewModel {
    pub id: String,
    pub program: String,
    pub kind: DeadlineKind,
    pub kind_label: &'static str,
    pub date_display: String,
    pub days_until: i64,
    pub location_display: String,
    pub status: DeadlineStatus,
    pub status_label: &'static str,
}

/// Derive the board row for one record as of `today`.
///
/// A missing deadline reports zero days and `Unknown`; a past deadline keeps
/// its negative day count so clients can show how long ago it closed.
pub fn deadline_view(record: &ProgramRecord, today: NaiveDate) -> DeadlineViewModel {
    let kind: DeadlineKind = ProgramCountry::from_territory(&record.country)
        .rule()
        .rule_type
        .into();

    let (date_display, days_until, status) = match record.deadline {
        Some(deadline) => {
            let days_until = (deadline - today).num_days();
            let status = if days_until > CLOSING_SOON_WINDOW_DAYS {
                DeadlineStatus::Open
            } else if days_until > 0 {
                DeadlineStatus::ClosingSoon
            } else {
                DeadlineStatus::Unknown
            };
            (format_long_date(deadline), days_until, status)
        }
        None => (
            MISSING_DEADLINE_PLACEHOLDER.to_string(),
            0,
            DeadlineStatus::Unknown,
        ),
    };

    DeadlineViewModel {
        id: record.id.clone(),
        program: record.title.clone(),
        kind,
        kind_label: kind.label(),
        date_display,
        days_until,
        location_display: record
            .location
            .clone()
            .unwrap_or_else(|| MISSING_LOCATION_PLACEHOLDER.to_string()),
        status,
        status_label: status.label(),
    }
}

/// Aggregate the overview counters from a full record list.
pub fn derive_stats(records: &[ProgramRecord], today: NaiveDate) -> ProgramStats {
    let mut stats = ProgramStats {
        total_programs: records.len(),
        ..ProgramStats::default()
    };

    for record in records {
        match record.deadline {
            Some(deadline) if deadline < today => stats.expired_programs += 1,
            _ => stats.active_programs += 1,
        }

        if record.is_high_priority {
            stats.high_priority += 1;
        }

        if let Some(deadline) = record.deadline {
            let days_until = (deadline - today).num_days();
            if days_until > 0 && days_until <= UPCOMING_WINDOW_DAYS {
                stats.upcoming_deadlines += 1;
            }
        }

        *stats.by_country.entry(record.country.clone()).or_default() += 1;
        *stats
            .by_source
            .entry(record.data_source.clone())
            .or_default() += 1;
        *stats
            .by_category
            .entry(record.category.clone())
            .or_default() += 1;
    }

    stats
}

fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
