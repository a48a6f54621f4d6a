// File: ./src/model/mod.rs
pub mod event;
pub mod merge;
pub mod parser;

pub use event::{ActionType, IssueEvent};
pub use merge::deduplicate;
pub use parser::{LogParser, extract_events};
