//! # cbx-cli — Command-Line Front End
//!
//! Provides the `cbx` binary. Every subcommand loads the project from the
//! configuration file named by the global `--config` option (default
//! `config.toml`) and then acts on it:
//!
//! ```bash
//! cbx export --toml --toml-file export.toml
//! cbx show ASVS-V2.1.1
//! cbx list --state unchecked --level L1
//! cbx mark ASVS-V2.1.1 checked --statement "Twelve characters minimum."
//! cbx report --outfile report.html
//! ```
//!
//! Handlers return the process exit code: `0` on success, `1` when the
//! requested uid or state is unknown. Fatal errors propagate as
//! `anyhow::Error`.

pub mod export;
pub mod list;
pub mod mark;
pub mod report;
pub mod show;

use std::path::Path;

use anyhow::{Context, Result};

use cbx_empire::Empire;

/// Default project configuration file.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Load the project described by `config`.
pub fn load_empire(config: &Path) -> Result<Empire> {
    Empire::load_config(config)
        .with_context(|| format!("failed to load project from {}", config.display()))
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::path::{Path, PathBuf};

    pub const ISVS: &str = r#"[
        {"ID": "V1.1.1", "Description": "Secure SDLC"},
        {"ID": "V2.1.1", "Description": "Password length"}
    ]"#;

    /// Write a one-section project into `dir` and return the config path.
    pub fn project(dir: &Path, with_database: bool) -> PathBuf {
        std::fs::write(dir.join("isvs.json"), ISVS).unwrap();
        let database = if with_database {
            "database_file = \"state.toml\"\n"
        } else {
            ""
        };
        let config = format!(
            "project = \"Shop\"\n{database}\n[sections.isvs]\nname = \"Device\"\n\
             prefix = \"I\"\ndescription = \"review\"\nfile_type = \"ISVS_JSON\"\n\
             data_file = \"isvs.json\"\n"
        );
        let path = dir.join("config.toml");
        std::fs::write(&path, config).unwrap();
        path
    }
}
