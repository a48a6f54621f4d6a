use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::env;
use std::fs;
use std::io::{self, Read};
use watchlog::config::{Config, OutputFormat};
use watchlog::report::{EventFilter, Stats, daily_summaries, user_tallies};
use watchlog::{IssueEvent, deduplicate, extract_events};

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    user: Option<String>,
    date: Option<String>,
    summary: bool,
    json: bool,
    verbose: bool,
    help: bool,
}

fn parse_args(raw: &[String]) -> Result<Args> {
    let mut args = Args::default();
    let mut iter = raw.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => args.help = true,
            "-s" | "--summary" => args.summary = true,
            "-j" | "--json" => args.json = true,
            "-v" | "--verbose" => args.verbose = true,
            "-u" | "--user" => {
                let user = iter.next().context("--user needs a value")?;
                args.user = Some(user.clone());
            }
            "-d" | "--date" => {
                let date = iter.next().context("--date needs a value")?;
                let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", date))?;
                // Events carry zero-padded dates; "2024-3-5" must still match.
                args.date = Some(day.format("%Y-%m-%d").to_string());
            }
            other if other.starts_with('-') && other != "-" => {
                bail!("Unknown option '{}'. See --help.", other)
            }
            other => {
                if args.input.is_some() {
                    bail!("Only one input file can be given");
                }
                args.input = Some(other.to_string());
            }
        }
    }
    Ok(args)
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read log from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(source).with_context(|| format!("Failed to read log file '{}'", source))
}

fn print_events(events: &[&IssueEvent], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(events)?),
        OutputFormat::Text => {
            for e in events {
                println!("{}", e);
            }
        }
    }
    Ok(())
}

fn print_summary(events: &[IssueEvent], format: OutputFormat) -> Result<()> {
    let stats = Stats::from_events(events);
    let users = user_tallies(events);
    let days = daily_summaries(events);

    match format {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "stats": stats,
                "users": users,
                "days": days,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        OutputFormat::Text => {
            println!(
                "{} issue(s), {} user(s)",
                stats.total_issues, stats.total_users
            );
            println!();
            for u in &users {
                println!("    {} ({})", u.ldap, u.count);
            }
            println!();
            for d in &days {
                let date = if d.iso_date.is_empty() {
                    "----------"
                } else {
                    d.iso_date.as_str()
                };
                println!("{} {}", date, d.label());
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&raw)?;

    if args.help {
        watchlog::cli::print_help("watchlog");
        return Ok(());
    }

    let config = Config::load()?;
    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        config.level_filter()
    };
    if let Err(e) = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Logger already initialised: {}", e);
    }

    let Some(source) = args.input.as_deref() else {
        watchlog::cli::print_help("watchlog");
        bail!("No input file given");
    };

    let text = read_input(source)?;
    let parsed = extract_events(&text);
    if parsed.is_empty() {
        bail!("No valid data found in '{}'. Check the file.", source);
    }
    let events = deduplicate(&parsed);
    log::info!(
        "{} notification(s) parsed, {} after merging duplicates",
        parsed.len(),
        events.len()
    );

    let filter = EventFilter {
        date: args.date,
        user: args.user.or(config.default_user),
    };
    let format = if args.json {
        OutputFormat::Json
    } else {
        config.output
    };

    if args.summary || config.summary {
        let selected: Vec<IssueEvent> = filter.apply(&events).into_iter().cloned().collect();
        print_summary(&selected, format)
    } else {
        print_events(&filter.apply(&events), format)
    }
}
