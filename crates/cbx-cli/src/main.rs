//! # cbx CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cbx_cli::export::{run_export, ExportArgs};
use cbx_cli::list::{run_list, ListArgs};
use cbx_cli::mark::{run_mark, MarkArgs};
use cbx_cli::report::{run_report, ReportArgs};
use cbx_cli::show::{run_show, ShowArgs};

/// Checkbox Empire: manage compliance checklists.
///
/// Imports ASVS, ISVS, MASVS and WSTG checklists into one project, tracks
/// a disposition per control, and renders exports and reports.
#[derive(Parser, Debug)]
#[command(name = "cbx", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// The main configuration file.
    #[arg(long, global = true, default_value = cbx_cli::DEFAULT_CONFIG)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export the project snapshot as JSON or TOML.
    Export(ExportArgs),

    /// Show control details.
    Show(ShowArgs),

    /// List controls.
    List(ListArgs),

    /// Mark a control with a state and a statement.
    Mark(MarkArgs),

    /// Render a report.
    Report(ReportArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(config = %cli.config.display(), "cbx starting");

    let result = match &cli.command {
        Commands::Export(args) => run_export(args, &cli.config),
        Commands::Show(args) => run_show(args, &cli.config),
        Commands::List(args) => run_list(args, &cli.config),
        Commands::Mark(args) => run_mark(args, &cli.config),
        Commands::Report(args) => run_report(args, &cli.config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
