pub mod catalog;
pub mod domain;
pub mod eligibility;
pub mod practices;
pub mod router;
mod rules;

pub use router::program_router;
pub use rules::{lookup_program, ProgramCountry, ProgramRule};
