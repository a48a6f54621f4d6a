// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.
use crate::config::OutputFormat;
use crate::model::ActionType;
use crate::paths::CONFIG_DIR_ENV;
use strum::IntoEnumIterator;

pub fn print_help(binary_name: &str) {
    println!(
        "Watchlog v{} - Turn WatchCenter chat-log exports into per-day issue events",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] <log.txt>", binary_name);
    println!("    {} [OPTIONS] -          Read the log from stdin", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -u, --user <ldap>     Only show notifications addressed to <ldap>.");
    println!("    -d, --date <date>     Only show notifications from <date> (YYYY-MM-DD).");
    println!("    -s, --summary         Print per-day counts per user instead of events.");
    println!("    -j, --json            Print JSON instead of text.");
    println!("    -v, --verbose         Log parser decisions to stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("OUTPUT FORMATS:");
    let formats: Vec<String> = OutputFormat::iter().map(|f| f.to_string()).collect();
    println!("    {}", formats.join(", "));
    println!();
    println!("INPUT FORMAT:");
    println!("    --------------- 2024년 3월 5일 화요일 ---------------");
    println!("    [WatchCenter] [오후 3:21] alice 님아");
    println!("    https://jira.example.com/browse/PROJ-42");
    println!("    └ Fix login bug");
    println!("    이슈가 할당되었습니다");
    println!();
    let kinds: Vec<String> = ActionType::iter()
        .map(|a| format!("{} ({})", a.label(), a))
        .collect();
    println!("    Action types: {}", kinds.join(", "));
    println!("    Duplicate notifications for the same issue on the same day are merged;");
    println!("    an assignment always wins over mentions and comments.");
    println!();
    println!("CONFIG:");
    println!(
        "    config.toml in the platform config directory (override with ${}).",
        CONFIG_DIR_ENV
    );
    println!("    Keys: default_user, output, summary, log_level");
}
