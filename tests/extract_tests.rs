// Extraction behaviour over realistic WatchCenter exports.
use watchlog::model::event::{NO_ISSUE_KEY, NO_ISSUE_URL, UNKNOWN_DISPLAY_DATE, UNKNOWN_TARGET};
use watchlog::model::{ActionType, LogParser};
use watchlog::extract_events;

const SEPARATOR: &str = "--------------- 2024년 3월 5일 화요일 ---------------";

fn sample_log() -> String {
    [
        SEPARATOR,
        "[WatchCenter] [오후 3:21] alice 님아",
        "https://jira.example.com/browse/PROJ-42",
        "└ Fix login bug",
        "이슈가 할당되었습니다",
    ]
    .join("\n")
}

#[test]
fn test_worked_example() {
    let events = extract_events(&sample_log());
    assert_eq!(events.len(), 1);

    let e = &events[0];
    assert_eq!(e.target_ldap, "alice");
    assert_eq!(e.issue_key, "PROJ-42");
    assert_eq!(e.summary, "Fix login bug");
    assert_eq!(e.action_type, ActionType::Assignment);
    assert_eq!(e.iso_date, "2024-03-05");
    assert_eq!(e.display_date, "2024년 3월 5일 화요일");
    assert_eq!(e.raw_timestamp, "오후 3:21");
    assert_eq!(e.issue_url, "https://jira.example.com/browse/PROJ-42");
    assert_eq!(
        e.date(),
        chrono::NaiveDate::from_ymd_opt(2024, 3, 5),
        "iso date should parse as a calendar day"
    );
}

#[test]
fn test_empty_and_whitespace_input() {
    assert!(extract_events("").is_empty());
    assert!(extract_events("   \n\n\t  \n").is_empty());
}

#[test]
fn test_text_without_notifications_yields_nothing() {
    let text = "hello\nthis is just chat\n--------------- 2024년 3월 5일 화요일 ---------------";
    assert!(extract_events(text).is_empty());
}

#[test]
fn test_blank_lines_do_not_break_buffering() {
    let spaced = [
        SEPARATOR,
        "",
        "[WatchCenter] [오후 3:21] alice 님아",
        "   ",
        "",
        "https://jira.example.com/browse/PROJ-42",
        "",
        "└ Fix login bug",
        "\t",
        "이슈가 할당되었습니다",
        "",
    ]
    .join("\n");

    assert_eq!(extract_events(&spaced), extract_events(&sample_log()));
}

#[test]
fn test_crlf_line_endings() {
    let crlf = sample_log().replace('\n', "\r\n");
    assert_eq!(extract_events(&crlf), extract_events(&sample_log()));
}

#[test]
fn test_leading_byte_order_mark_is_ignored() {
    let text = format!("\u{feff}{}", "[WatchCenter] [오후 3:21] alice 님아\nhttps://jira/browse/PROJ-42");
    let events = extract_events(&text);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target_ldap, "alice", "BOM must not leak into the addressee");
}

#[test]
fn test_empty_name_before_marker_is_unknown() {
    let text = "[WatchCenter] [오전 9:00] 님아\nhttps://jira/browse/ABC-1\n코멘트가 달렸습니다";
    let events = extract_events(text);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target_ldap, UNKNOWN_TARGET);
}

#[test]
fn test_header_without_remainder_is_unknown_target() {
    let text = "[WatchCenter] [오전 9:00]\nhttps://jira/browse/ABC-1";
    let events = extract_events(text);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target_ldap, UNKNOWN_TARGET);
    assert_eq!(events[0].action_type, ActionType::Notice);
}

#[test]
fn test_first_line_without_marker_is_used_whole() {
    let text = "[WatchCenter] [오전 9:00] bob\nbrowse/ABC-7";
    let events = extract_events(text);
    assert_eq!(events[0].target_ldap, "bob");
}

#[test]
fn test_no_separator_keeps_unknown_date() {
    let text = [
        "[WatchCenter] [오후 1:00] alice 님아",
        "https://jira/browse/ABC-1",
        "[WatchCenter] [오후 2:00] bob 님아",
        "멘션되었습니다",
    ]
    .join("\n");

    let events = extract_events(&text);
    assert_eq!(events.len(), 2);
    for e in &events {
        assert_eq!(e.iso_date, "");
        assert_eq!(e.display_date, UNKNOWN_DISPLAY_DATE);
        assert!(e.date().is_none());
    }
}

#[test]
fn test_link_on_last_line_has_empty_summary() {
    let text = "[WatchCenter] [오후 1:00] alice 님아\n할당\nhttps://jira/browse/ABC-9";
    let events = extract_events(text);
    assert_eq!(events[0].issue_key, "ABC-9");
    assert_eq!(events[0].summary, "");
}

#[test]
fn test_last_link_wins() {
    let text = [
        "[WatchCenter] [오후 1:00] alice 님아",
        "https://jira/browse/ABC-1",
        "└ First",
        "https://jira/browse/XYZ-2",
        "└ Second",
    ]
    .join("\n");

    let events = extract_events(&text);
    assert_eq!(events[0].issue_key, "XYZ-2");
    assert_eq!(events[0].issue_url, "https://jira/browse/XYZ-2");
    assert_eq!(events[0].summary, "Second");
}

#[test]
fn test_trailing_link_keeps_earlier_summary() {
    let text = [
        "[WatchCenter] [오후 1:00] alice 님아",
        "https://jira/browse/ABC-1",
        "└ First",
        "https://jira/browse/XYZ-2",
    ]
    .join("\n");

    let events = extract_events(&text);
    assert_eq!(events[0].issue_key, "XYZ-2");
    assert_eq!(events[0].summary, "First");
}

#[test]
fn test_keyword_precedence_within_line() {
    let text = "[WatchCenter] [오후 1:00] a 님아\n코멘트와 멘션 그리고 할당\n";
    assert_eq!(extract_events(text)[0].action_type, ActionType::Assignment);

    let text = "[WatchCenter] [오후 1:00] a 님아\n코멘트와 멘션\n";
    assert_eq!(extract_events(text)[0].action_type, ActionType::Mention);

    let text = "[WatchCenter] [오후 1:00] a 님아\n이슈 생성\n";
    assert_eq!(extract_events(text)[0].action_type, ActionType::Comment);
}

#[test]
fn test_last_keyword_line_wins() {
    let text = "[WatchCenter] [오후 1:00] a 님아\n할당되었습니다\n코멘트가 달렸습니다";
    let events = extract_events(text);
    assert_eq!(events[0].action_type, ActionType::Comment);
}

#[test]
fn test_keyword_without_link_uses_placeholders() {
    let text = "[WatchCenter] [오후 1:00] a 님아\n멘션되었습니다";
    let e = &extract_events(text)[0];
    assert_eq!(e.issue_key, NO_ISSUE_KEY);
    assert_eq!(e.issue_url, NO_ISSUE_URL);
    assert!(!e.has_issue_key());
}

#[test]
fn test_notification_without_link_or_keyword_is_dropped() {
    let text = [
        "[WatchCenter] [오후 1:00] a 님아",
        "just saying hi",
        "[WatchCenter] [오후 1:05] b 님아",
        "https://jira/browse/ABC-3",
    ]
    .join("\n");

    let events = extract_events(&text);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target_ldap, "b");
}

#[test]
fn test_lowercase_project_key_is_not_a_link() {
    let text = "[WatchCenter] [오후 1:00] a 님아\nhttps://jira/browse/abc-3";
    assert!(extract_events(text).is_empty());
}

#[test]
fn test_date_context_applies_at_flush_time() {
    let text = [
        "--------------- 2024년 3월 5일 화요일 ---------------",
        "[WatchCenter] [오후 11:59] a 님아",
        "https://jira/browse/ABC-1",
        "--------------- 2024년 3월 6일 수요일 ---------------",
        "[WatchCenter] [오전 0:01] a 님아",
        "https://jira/browse/ABC-1",
    ]
    .join("\n");

    let events = extract_events(&text);
    let dates: Vec<&str> = events.iter().map(|e| e.iso_date.as_str()).collect();
    assert_eq!(dates, vec!["2024-03-05", "2024-03-06"]);
}

#[test]
fn test_lines_before_first_header_form_their_own_buffer() {
    // Orphan continuation lines are still a buffer; their first line is the addressee.
    let text = "carol 님\nbrowse/ORP-1\n[WatchCenter] [오후 1:00] a 님아\n할당";
    let events = extract_events(text);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].target_ldap, "carol");
    assert_eq!(events[0].raw_timestamp, "");
    assert_eq!(events[1].raw_timestamp, "오후 1:00");
}

#[test]
fn test_incremental_parser_matches_batch() {
    let mut parser = LogParser::new();
    for line in sample_log().lines() {
        parser.push_line(line);
    }
    assert_eq!(parser.finish(), extract_events(&sample_log()));
}

#[test]
fn test_events_serialize_with_camel_case_fields() {
    let events = extract_events(&sample_log());
    let json = serde_json::to_value(&events[0]).expect("serializable");
    assert_eq!(json["targetLdap"], "alice");
    assert_eq!(json["issueKey"], "PROJ-42");
    assert_eq!(json["isoDate"], "2024-03-05");
    assert_eq!(json["actionType"], "Assignment");
}
