//! # Project Configuration
//!
//! A TOML document naming the project, its sections, an optional state
//! database and optional project tags:
//!
//! ```toml
//! project = "Webshop"
//! database_file = "state.toml"
//!
//! [sections.asvs]
//! name = "Web application"
//! prefix = "ASVS"
//! description = "Level 2 review"
//! file_type = "ASVS_JSON"
//! data_file = "data/asvs.json"
//!
//! [project_tags]
//! has_login = false
//!
//! [tag_patterns]
//! uses_graphql = ["*-V13.4.*"]
//! ```
//!
//! Relative paths resolve against the directory holding the configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use cbx_pack::parser::OrderedEntries;
use cbx_pack::FileType;

use crate::error::{EmpireError, EmpireResult};

/// A decoded project configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Project name.
    pub project: String,
    /// Persisted state database, if any.
    #[serde(default)]
    pub database_file: Option<PathBuf>,
    /// Sections in configuration order, keyed by section key.
    pub sections: OrderedEntries<SectionConfig>,
    /// Project characteristics driving tag overrides, in configuration order.
    #[serde(default)]
    pub project_tags: OrderedEntries<bool>,
    /// Per-project additions to, or replacements of, the built-in tag table.
    #[serde(default)]
    pub tag_patterns: BTreeMap<String, Vec<String>>,
    #[serde(skip)]
    base_dir: PathBuf,
}

/// One configured section.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionConfig {
    /// Display name.
    pub name: String,
    /// Uid prefix of every control in the section.
    pub prefix: String,
    /// Free-text description.
    pub description: String,
    /// Source format.
    pub file_type: FileType,
    /// Source data file.
    pub data_file: PathBuf,
}

impl ProjectConfig {
    /// Read and decode a configuration file.
    pub fn load(path: &Path) -> EmpireResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EmpireError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                EmpireError::Io(e)
            }
        })?;
        let base_dir = path.parent().unwrap_or(Path::new("")).to_path_buf();
        Self::parse(&content, path, base_dir)
    }

    /// Decode configuration text. `origin` is used for error context,
    /// `base_dir` anchors relative paths.
    pub fn parse(content: &str, origin: &Path, base_dir: PathBuf) -> EmpireResult<Self> {
        let mut config: ProjectConfig =
            toml::from_str(content).map_err(|e| EmpireError::ConfigParse {
                path: origin.to_path_buf(),
                source: e,
            })?;
        config.base_dir = base_dir;
        Ok(config)
    }

    /// Resolve a configured path against the configuration's directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// The resolved database path, if configured.
    pub fn database_path(&self) -> Option<PathBuf> {
        self.database_file.as_deref().map(|p| self.resolve(p))
    }
}
