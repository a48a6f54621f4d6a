// File: src/model/parser.rs
//! Buffered line parser for exported WatchCenter chat logs.
//!
//! A log is a sequence of day separators and bot notifications:
//!
//! ```text
//! --------------- 2024년 3월 5일 화요일 ---------------
//! [WatchCenter] [오후 3:21] alice 님아
//! https://jira.example.com/browse/PROJ-42
//! └ Fix login bug
//! 이슈가 할당되었습니다
//! ```
//!
//! Each notification's lines are collected into a buffer which is turned into
//! at most one [`IssueEvent`] when the next boundary (separator, header or end
//! of input) arrives. Parsing never fails; anything unrecognised degrades to
//! placeholder values or is dropped.
use crate::model::event::{
    ActionType, IssueEvent, NO_ISSUE_KEY, NO_ISSUE_URL, UNKNOWN_DISPLAY_DATE, UNKNOWN_TARGET,
};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-{15}\s([0-9]{4}년\s[0-9]{1,2}월\s[0-9]{1,2}일.*?)\s-{15}")
        .expect("date marker pattern")
});
static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[WatchCenter\] \[(.*?)\]").expect("header pattern"));
static ISSUE_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"browse/([A-Z]+-[0-9]+)").expect("issue link pattern"));
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("number pattern"));

/// Separates the addressee from the greeting on a notification's first line.
const ADDRESS_MARKER: char = '님';
const CONNECTOR_GLYPHS: [char; 2] = ['└', '|'];

/// What a single trimmed, non-blank line means to the parser.
#[derive(Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Day separator. Carries the captured date phrase.
    DateMarker(&'a str),
    /// Start of a notification.
    Header { timestamp: &'a str, remainder: String },
    Continuation(&'a str),
}

/// Classifies one line. Day separators take precedence over headers.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(caps) = DATE_MARKER_RE.captures(line)
        && let Some(phrase) = caps.get(1)
    {
        return LineKind::DateMarker(phrase.as_str());
    }

    if let Some(caps) = HEADER_RE.captures(line)
        && let Some(ts) = caps.get(1)
    {
        let remainder = HEADER_RE.replace(line, "").trim().to_string();
        return LineKind::Header {
            timestamp: ts.as_str(),
            remainder,
        };
    }

    LineKind::Continuation(line)
}

/// Turns a date phrase such as "2024년 3월 5일 화요일" into "2024-03-05".
/// Returns an empty string when the phrase holds fewer than three numbers.
pub fn to_iso_date(phrase: &str) -> String {
    let nums: Vec<&str> = NUMBER_RE
        .find_iter(phrase)
        .take(3)
        .map(|m| m.as_str())
        .collect();
    match nums.as_slice() {
        [year, month, day] => format!("{}-{:0>2}-{:0>2}", year, month, day),
        _ => String::new(),
    }
}

/// The day the parser believes it is in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateContext {
    pub display_date: String,
    pub iso_date: String,
}

impl DateContext {
    pub fn from_phrase(phrase: &str) -> Self {
        Self {
            display_date: phrase.to_string(),
            iso_date: to_iso_date(phrase),
        }
    }
}

impl Default for DateContext {
    fn default() -> Self {
        Self {
            display_date: UNKNOWN_DISPLAY_DATE.to_string(),
            iso_date: String::new(),
        }
    }
}

fn extract_target(first_line: &str) -> String {
    let raw = match first_line.split_once(ADDRESS_MARKER) {
        Some((before, _)) => before,
        None => first_line,
    }
    .trim();

    if raw.is_empty() {
        UNKNOWN_TARGET.to_string()
    } else {
        raw.to_string()
    }
}

fn strip_connectors(line: &str) -> &str {
    line.trim_start_matches(|c: char| CONNECTOR_GLYPHS.contains(&c) || c.is_whitespace())
        .trim()
}

/// Builds the event for one flushed buffer.
///
/// Every tracker link overwrites the previous one, so the last link in the
/// buffer decides `issue_key`/`issue_url`. The same holds for action keywords.
/// Returns None when the buffer has neither a link nor a keyword.
pub fn build_event(lines: &[String], timestamp: &str, date: &DateContext) -> Option<IssueEvent> {
    let first = lines.first()?;
    let target_ldap = extract_target(first);

    let mut issue_key = NO_ISSUE_KEY.to_string();
    let mut issue_url = NO_ISSUE_URL.to_string();
    let mut summary = String::new();
    let mut action_type = ActionType::default();
    let mut found_action = false;

    for (idx, line) in lines.iter().enumerate() {
        let line = line.trim();

        if let Some(caps) = ISSUE_LINK_RE.captures(line)
            && let Some(key) = caps.get(1)
        {
            issue_key = key.as_str().to_string();
            issue_url = line.to_string();
            if let Some(next) = lines.get(idx + 1)
                && !next.is_empty()
            {
                summary = strip_connectors(next).to_string();
            }
        }

        if let Some(kind) = ActionType::classify(line) {
            action_type = kind;
            found_action = true;
        }
    }

    if !found_action && issue_key == NO_ISSUE_KEY {
        log::debug!(
            "Dropping notification for '{}' at '{}': no issue link or action keyword",
            target_ldap,
            timestamp
        );
        return None;
    }

    Some(IssueEvent {
        target_ldap,
        issue_key,
        summary,
        action_type,
        raw_timestamp: timestamp.to_string(),
        display_date: date.display_date.clone(),
        iso_date: date.iso_date.clone(),
        issue_url,
    })
}

/// Single-pass parser state. Owned by one extraction and consumed by
/// [`LogParser::finish`].
#[derive(Debug, Default)]
pub struct LogParser {
    date: DateContext,
    timestamp: String,
    buffer: Vec<String>,
    events: Vec<IssueEvent>,
}

impl LogParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw line. Blank lines are ignored entirely.
    pub fn push_line(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }

        match classify_line(line) {
            LineKind::DateMarker(phrase) => {
                self.flush();
                self.date = DateContext::from_phrase(phrase);
                log::trace!(
                    "Date context now '{}' ({})",
                    self.date.display_date,
                    self.date.iso_date
                );
            }
            LineKind::Header {
                timestamp,
                remainder,
            } => {
                self.flush();
                self.timestamp = timestamp.to_string();
                self.buffer.push(remainder);
            }
            LineKind::Continuation(text) => self.buffer.push(text.to_string()),
        }
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        log::trace!("Flushing {} buffered line(s)", self.buffer.len());
        if let Some(event) = build_event(&self.buffer, &self.timestamp, &self.date) {
            self.events.push(event);
        }
        self.buffer.clear();
    }

    /// Flushes whatever is still buffered and returns the events in log order.
    pub fn finish(mut self) -> Vec<IssueEvent> {
        self.flush();
        self.events
    }
}

/// Extracts every notification in `text`, in log order.
/// Returns an empty list when nothing in the text is recognisable.
/// A leading UTF-8 byte order mark is ignored.
pub fn extract_events(text: &str) -> Vec<IssueEvent> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut parser = LogParser::new();
    for line in text.lines() {
        parser.push_line(line);
    }
    let events = parser.finish();
    log::debug!("Extracted {} notification(s)", events.len());
    events
}
