// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod model;
pub mod paths;
pub mod report;

pub use model::{ActionType, IssueEvent, deduplicate, extract_events};
