//! # `cbx export`
//!
//! Without `--toml` the project snapshot is printed to stdout as JSON.
//! With `--toml` it is written to `--toml-file` (default `export.toml`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use cbx_empire::report::export_toml;
use cbx_empire::Empire;

/// Arguments for `cbx export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write the snapshot as TOML instead of printing JSON.
    #[arg(long)]
    pub toml: bool,

    /// Target file for `--toml`.
    #[arg(long, default_value = "export.toml")]
    pub toml_file: PathBuf,
}

/// Execute `cbx export`.
pub fn run_export(args: &ExportArgs, config: &Path) -> Result<u8> {
    let empire = crate::load_empire(config)?;
    if args.toml {
        write_toml(&empire, &args.toml_file)?;
        println!("exported {} controls to {}", empire.controls().count(), args.toml_file.display());
    } else {
        println!("{}", render_json(&empire)?);
    }
    Ok(0)
}

/// Pretty JSON rendering of the project snapshot.
pub fn render_json(empire: &Empire) -> Result<String> {
    serde_json::to_string_pretty(&empire.to_representation())
        .context("failed to serialize snapshot as JSON")
}

/// Write the project snapshot as TOML.
pub fn write_toml(empire: &Empire, path: &Path) -> Result<()> {
    let text = export_toml(&empire.to_representation())?;
    std::fs::write(path, text)
        .with_context(|| format!("failed to write export: {}", path.display()))?;
    tracing::info!(path = %path.display(), "snapshot exported");
    Ok(())
}
