//! Crew catalogue and crew results.

pub mod catalog;
pub mod crew_output;

pub use catalog::{build_pipeline, CrewBlueprint, CrewKind};
pub use crew_output::CrewOutput;
