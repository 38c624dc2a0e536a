use chrono::Duration;

use super::super::domain::{ProgramRecord, ProgramStats};

/// Upstream feed abstraction so the catalog service can be exercised in
/// isolation and the HTTP client swapped without touching callers.
pub trait ProgramSource: Send + Sync {
    fn fetch_programs(&self) -> Result<Vec<ProgramRecord>, SourceError>;
    fn fetch_deadlines_soon(&self, days: u32) -> Result<Vec<ProgramRecord>, SourceError>;
    fn fetch_stats(&self) -> Result<ProgramStats, SourceError>;
    fn fetch_high_priority(&self) -> Result<Vec<ProgramRecord>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("program source unreachable: {0}")]
    Unreachable(String),
    #[error("program source returned malformed data: {0}")]
    Malformed(String),
}

/// One cache slot per upstream endpoint. Deadline lookups cache per window so
/// a 7-day board never serves a 30-day payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Programs,
    DeadlinesSoon { days: u32 },
    Stats,
    HighPriority,
}

impl CacheKey {
    pub fn endpoint(&self) -> String {
        match self {
            Self::Programs => "/api/programs/enhanced".to_string(),
            Self::DeadlinesSoon { days } => {
                format!("/api/programs/deadlines-soon?days={days}")
            }
            Self::Stats => "/api/programs/stats".to_string(),
            Self::HighPriority => "/api/programs/high-priority".to_string(),
        }
    }
}

/// How long each endpoint's last good payload stays authoritative.
#[derive(Debug, Clone)]
pub struct FreshnessConfig {
    pub programs_window: Duration,
    pub deadlines_window: Duration,
    pub stats_window: Duration,
    pub high_priority_window: Duration,
}

impl FreshnessConfig {
    pub fn window_for(&self, key: &CacheKey) -> Duration {
        match key {
            CacheKey::Programs => self.programs_window,
            CacheKey::DeadlinesSoon { .. } => self.deadlines_window,
            CacheKey::Stats => self.stats_window,
            CacheKey::HighPriority => self.high_priority_window,
        }
    }
}
