// File: ./src/model/event.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Placeholder for a notification whose addressee could not be read.
pub const UNKNOWN_TARGET: &str = "unknown";
/// Placeholder for a notification without a tracker link.
pub const NO_ISSUE_KEY: &str = "no-key";
/// Placeholder link for a notification without a tracker link.
pub const NO_ISSUE_URL: &str = "#";
/// Display date in force before the first day separator.
pub const UNKNOWN_DISPLAY_DATE: &str = "날짜 미상";

pub const KEYWORD_ASSIGNMENT: &str = "할당";
pub const KEYWORD_MENTION: &str = "멘션";
pub const KEYWORD_COMMENT: &str = "코멘트";
pub const KEYWORD_CREATION: &str = "생성";

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize, EnumIter,
)]
pub enum ActionType {
    Assignment,
    Mention,
    Comment,
    #[default]
    Notice,
}

impl ActionType {
    /// Classifies one line by keyword precedence.
    /// Returns None when the line carries no action keyword at all.
    pub fn classify(line: &str) -> Option<Self> {
        if line.contains(KEYWORD_ASSIGNMENT) {
            Some(Self::Assignment)
        } else if line.contains(KEYWORD_MENTION) {
            Some(Self::Mention)
        } else if line.contains(KEYWORD_COMMENT) || line.contains(KEYWORD_CREATION) {
            Some(Self::Comment)
        } else {
            None
        }
    }

    pub fn is_assignment(&self) -> bool {
        matches!(self, Self::Assignment)
    }

    /// The label the bot itself uses for this kind of notification.
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::Assignment => KEYWORD_ASSIGNMENT,
            ActionType::Mention => KEYWORD_MENTION,
            ActionType::Comment => KEYWORD_COMMENT,
            ActionType::Notice => "알림",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::Assignment => write!(f, "Assignment"),
            ActionType::Mention => write!(f, "Mention"),
            ActionType::Comment => write!(f, "Comment"),
            ActionType::Notice => write!(f, "Notice"),
        }
    }
}

/// One bot notification, as read from a flushed message buffer.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueEvent {
    pub target_ldap: String,
    pub issue_key: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub action_type: ActionType,
    #[serde(default)]
    pub raw_timestamp: String,
    pub display_date: String,
    // Empty when the day is unknown.
    #[serde(default)]
    pub iso_date: String,
    pub issue_url: String,
}

impl IssueEvent {
    pub fn has_issue_key(&self) -> bool {
        self.issue_key != NO_ISSUE_KEY
    }

    /// Calendar day of the notification, if the log told us one.
    pub fn date(&self) -> Option<NaiveDate> {
        if self.iso_date.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(&self.iso_date, "%Y-%m-%d").ok()
    }

    /// `(isoDate, issueKey)`: "the same issue on the same day".
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.iso_date, &self.issue_key)
    }
}

impl fmt::Display for IssueEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = if self.iso_date.is_empty() {
            "----------"
        } else {
            self.iso_date.as_str()
        };
        write!(
            f,
            "{} [{}] {} {}",
            date,
            self.action_type.label(),
            self.target_ldap,
            self.issue_key
        )?;
        if !self.summary.is_empty() {
            write!(f, " {}", self.summary)?;
        }
        Ok(())
    }
}
