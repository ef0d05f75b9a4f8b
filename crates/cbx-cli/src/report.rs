//! # `cbx report`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;

use cbx_empire::report::render_html;
use cbx_empire::{Empire, ReportType};

/// Arguments for `cbx report`.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Report format.
    #[arg(long, default_value = "html")]
    pub report_type: ReportType,

    /// Template file with `{{ project }}`, `{{ generated_at }}` and
    /// `{{ sections }}` placeholders.
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Output file.
    #[arg(long, default_value = "report.html")]
    pub outfile: PathBuf,
}

/// Execute `cbx report`.
pub fn run_report(args: &ReportArgs, config: &Path) -> Result<u8> {
    let empire = crate::load_empire(config)?;
    write_report(&empire, args)?;
    println!("report written to {}", args.outfile.display());
    Ok(0)
}

/// Render and write the report described by `args`.
pub fn write_report(empire: &Empire, args: &ReportArgs) -> Result<()> {
    let template = args
        .template
        .as_deref()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read template: {}", path.display()))
        })
        .transpose()?;
    let rendered = match args.report_type {
        ReportType::Html => render_html(
            empire.project(),
            &empire.to_representation(),
            template.as_deref(),
            Utc::now(),
        ),
    };
    std::fs::write(&args.outfile, rendered)
        .with_context(|| format!("failed to write report: {}", args.outfile.display()))?;
    tracing::info!(path = %args.outfile.display(), report_type = %args.report_type, "report written");
    Ok(())
}
