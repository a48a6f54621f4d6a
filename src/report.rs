// File: ./src/report.rs
//! Read-only views over deduplicated events: who was notified how often,
//! what each person received per day, and simple date/user filtering.
use crate::model::{ActionType, IssueEvent};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserTally {
    pub ldap: String,
    pub count: usize,
}

/// Distinct addressees, sorted by name, with how many events each received.
pub fn user_tallies(events: &[IssueEvent]) -> Vec<UserTally> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for e in events {
        *counts.entry(e.target_ldap.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(ldap, count)| UserTally {
            ldap: ldap.to_string(),
            count,
        })
        .collect()
}

/// Action counts for one person on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    pub iso_date: String,
    pub target_ldap: String,
    pub assign: usize,
    pub mention: usize,
    // Plain notices are counted here too.
    pub comment: usize,
}

impl DailySummary {
    fn new(iso_date: &str, target_ldap: &str) -> Self {
        Self {
            iso_date: iso_date.to_string(),
            target_ldap: target_ldap.to_string(),
            assign: 0,
            mention: 0,
            comment: 0,
        }
    }

    fn record(&mut self, action: ActionType) {
        match action {
            ActionType::Assignment => self.assign += 1,
            ActionType::Mention => self.mention += 1,
            ActionType::Comment | ActionType::Notice => self.comment += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.assign + self.mention + self.comment
    }

    /// e.g. "[alice] 할당 2, 코멘트 1". Zero counts are left out.
    pub fn label(&self) -> String {
        let parts: Vec<String> = [
            (ActionType::Assignment, self.assign),
            (ActionType::Mention, self.mention),
            (ActionType::Comment, self.comment),
        ]
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(kind, n)| format!("{} {}", kind.label(), n))
        .collect();
        format!("[{}] {}", self.target_ldap, parts.join(", "))
    }
}

/// One row per `(isoDate, targetLdap)`, in order of first appearance.
pub fn daily_summaries(events: &[IssueEvent]) -> Vec<DailySummary> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut rows: Vec<DailySummary> = Vec::new();

    for e in events {
        let key = (e.iso_date.as_str(), e.target_ldap.as_str());
        let idx = *index.entry(key).or_insert_with(|| {
            rows.push(DailySummary::new(&e.iso_date, &e.target_ldap));
            rows.len() - 1
        });
        rows[idx].record(e.action_type);
    }
    rows
}

/// Narrows a list of events to a day and/or a person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub date: Option<String>,
    pub user: Option<String>,
}

impl EventFilter {
    pub fn matches(&self, event: &IssueEvent) -> bool {
        if let Some(date) = &self.date
            && &event.iso_date != date
        {
            return false;
        }
        if let Some(user) = &self.user
            && &event.target_ldap != user
        {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, events: &'a [IssueEvent]) -> Vec<&'a IssueEvent> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_issues: usize,
    pub total_users: usize,
}

impl Stats {
    pub fn from_events(events: &[IssueEvent]) -> Self {
        let users: HashSet<&str> = events.iter().map(|e| e.target_ldap.as_str()).collect();
        Self {
            total_issues: events.len(),
            total_users: users.len(),
        }
    }
}
