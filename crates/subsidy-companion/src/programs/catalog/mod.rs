//! Program catalog: upstream source abstraction, per-endpoint cache, list
//! transforms, and the display views the clients render.

mod import;
pub mod query;
mod service;
pub mod source;
pub mod views;

pub use import::{ProgramCsvImporter, ProgramImportError};
pub use query::{filter_and_sort, CatalogQuery};
pub use service::CompanionService;
pub use source::{CacheKey, FreshnessConfig, ProgramSource, SourceError};
pub use views::{
    card_view, deadline_view, derive_stats, DeadlineKind, DeadlineStatus, DeadlineViewModel,
    ProgramCardView,
};
