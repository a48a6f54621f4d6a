// File: ./src/model/merge.rs
use crate::model::IssueEvent;
use std::collections::HashMap;

/// Collapses duplicate notifications so that each `(isoDate, issueKey)` pair
/// appears once.
///
/// The first event seen for a pair becomes its representative. It is replaced
/// only when it is not an assignment and a later duplicate is one. Output
/// keeps the order in which each pair first appeared.
pub fn deduplicate(events: &[IssueEvent]) -> Vec<IssueEvent> {
    let mut slots: HashMap<(&str, &str), usize> = HashMap::new();
    let mut kept: Vec<&IssueEvent> = Vec::new();

    for event in events {
        match slots.get(&event.dedup_key()) {
            Some(&idx) => {
                if !kept[idx].action_type.is_assignment() && event.action_type.is_assignment() {
                    kept[idx] = event;
                }
            }
            None => {
                slots.insert(event.dedup_key(), kept.len());
                kept.push(event);
            }
        }
    }

    log::debug!(
        "Deduplicated {} event(s) down to {}",
        events.len(),
        kept.len()
    );
    kept.into_iter().cloned().collect()
}
