//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads settings and builds the external services once
//! - dispatches to the update / query / scoring handlers
//! - prints reports and writes optional exports

use chrono::{Local, Utc};
use clap::Parser;

use crate::app::pipeline::{Services, UpdateOptions};
use crate::cli::{Cli, Command, CurrentArgs, HistoryArgs, ScoreArgs, StoredArgs, UpdateArgs};
use crate::config::Settings;
use crate::error::{AppError, EXIT_CONFIG, EXIT_DATA};
use crate::signals::RegimeInputs;

pub mod pipeline;

/// Entry point for the `macro-dash` binary.
pub fn run() -> Result<(), AppError> {
    // We want `macro-dash` and `macro-dash --store x.json` to behave like `macro-dash tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    // Scoring is pure; it must not depend on the environment being configured.
    if let Command::Score(args) = &cli.command {
        return handle_score(args);
    }

    let mut settings = Settings::from_env()?;
    if let Some(path) = &cli.store {
        settings.store_path = path.clone();
    }
    if let Some(rate) = cli.neutral_rate {
        if !rate.is_finite() {
            return Err(AppError::new(EXIT_CONFIG, "--neutral-rate must be a finite number."));
        }
        settings.neutral_rate = rate;
    }
    log::debug!(
        "store={} neutral_rate={}",
        settings.store_path.display(),
        settings.neutral_rate
    );

    let services = Services::from_settings(&settings);

    match cli.command {
        Command::Update(args) => handle_update(&services, &args),
        Command::Current(args) => handle_current(&services, &args),
        Command::Stored(args) => handle_stored(&services, &args),
        Command::History(args) => handle_history(&services, &args),
        Command::Score(args) => handle_score(&args),
        Command::Summary => handle_summary(&services),
        Command::NotifyTest => handle_notify_test(&services),
        Command::Tui(args) => crate::tui::run(&services, args.days),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(EXIT_DATA, format!("Failed to encode JSON: {e}")))
}

fn handle_update(services: &Services, args: &UpdateArgs) -> Result<(), AppError> {
    let options = UpdateOptions {
        notify: !args.no_notify,
        summarize: args.summary,
    };
    let report = pipeline::run_update(services, Utc::now(), options)?;

    if args.json {
        println!("{}", to_json(&report.scored)?);
    } else {
        print!("{}", crate::report::format_update_report(&report));
    }
    Ok(())
}

fn handle_current(services: &Services, args: &CurrentArgs) -> Result<(), AppError> {
    let Some(scored) = pipeline::current(services)? else {
        println!("No stored snapshot yet; run `macro-dash update` first.");
        return Ok(());
    };

    if args.json {
        println!("{}", to_json(&scored)?);
    } else {
        print!("{}", crate::report::format_scored_snapshot(&scored));
    }
    Ok(())
}

fn handle_stored(services: &Services, args: &StoredArgs) -> Result<(), AppError> {
    let rows = pipeline::stored(services, args.limit)?;
    print!("{}", crate::report::format_stored(&rows));
    Ok(())
}

fn handle_history(services: &Services, args: &HistoryArgs) -> Result<(), AppError> {
    let today = Local::now().date_naive();
    let bundle = pipeline::history(services, args.days, today);

    match args.indicator {
        Some(indicator) => {
            let outcome = bundle
                .outcome(indicator)
                .cloned()
                .unwrap_or(crate::domain::SeriesOutcome::Empty);
            print!("{}", crate::report::format_series(indicator, &outcome));
        }
        None => print!("{}", crate::report::format_history_overview(&bundle)),
    }

    if let Some(path) = &args.export {
        let rows = crate::io::export::write_history_csv(path, &bundle)?;
        println!("Exported {rows} rows to {}", path.display());
    }
    Ok(())
}

fn handle_score(args: &ScoreArgs) -> Result<(), AppError> {
    let inputs = RegimeInputs {
        gdp_growth: args.gdp_growth,
        inflation: args.inflation,
        unemployment: args.unemployment,
        manufacturing_index: args.manufacturing,
        real_rate: args.real_rate,
        yield_curve_spread: args.yield_spread,
        fed_stance: args.fed_stance,
    };
    print!("{}", crate::report::format_breakdown(&inputs.score()));
    Ok(())
}

fn handle_summary(services: &Services) -> Result<(), AppError> {
    let (snapshot, summary) = pipeline::summarize_latest(services)?;
    println!(
        "Summary for snapshot {}:\n\n{summary}",
        snapshot.timestamp.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

fn handle_notify_test(services: &Services) -> Result<(), AppError> {
    services.notifier.send(&crate::notify::test_notification())?;
    println!("Test notification sent.");
    Ok(())
}

/// Rewrite argv so `macro-dash` defaults to `macro-dash tui`.
///
/// Rules:
/// - `macro-dash`                       -> `macro-dash tui`
/// - `macro-dash --store x.json ...`      -> `macro-dash tui --store x.json ...`
/// - `macro-dash --help/--version/-h`     -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "update" | "current" | "stored" | "history" | "score" | "summary" | "notify-test" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_launches_tui() {
        assert_eq!(rewrite_args(args(&["macro-dash"])), args(&["macro-dash", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(args(&["macro-dash", "--store", "x.json"])),
            args(&["macro-dash", "tui", "--store", "x.json"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        for argv in [
            args(&["macro-dash", "update", "--no-notify"]),
            args(&["macro-dash", "notify-test"]),
            args(&["macro-dash", "--help"]),
            args(&["macro-dash", "-V"]),
        ] {
            assert_eq!(rewrite_args(argv.clone()), argv);
        }
    }

    #[test]
    fn rewritten_args_parse() {
        let cli = Cli::parse_from(rewrite_args(args(&["macro-dash", "-d", "90"])));
        assert!(matches!(cli.command, Command::Tui(crate::cli::TuiArgs { days: 90 })));
    }
}
