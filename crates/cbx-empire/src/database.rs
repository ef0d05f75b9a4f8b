//! # Persisted State Database
//!
//! A document holding one `{uid, state, statement}` record per control:
//!
//! ```toml
//! [[controls]]
//! uid = "ASVS-V1.1.1"
//! state = "checked"
//! statement = "Threat model reviewed."
//! ```
//!
//! TOML is the default encoding; a `.json`, `.yaml` or `.yml` extension
//! selects JSON or YAML. `state` holds the canonical lowercase token.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EmpireError, EmpireResult};

/// Persisted disposition of one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    /// Control uid.
    pub uid: String,
    /// Canonical state token.
    pub state: String,
    /// Statement; empty when never set.
    #[serde(default)]
    pub statement: String,
}

/// The whole persisted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDatabase {
    /// Records in depth-first control order.
    #[serde(default)]
    pub controls: Vec<StateRecord>,
}

/// On-disk encoding of a state database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseFormat {
    Toml,
    Json,
    Yaml,
}

impl DatabaseFormat {
    /// Pick the encoding from the file extension; TOML unless `.json`,
    /// `.yaml` or `.yml`.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Toml,
        }
    }
}

impl StateDatabase {
    /// Read a database. Returns `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> EmpireResult<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no state database yet");
                return Ok(None);
            }
            Err(e) => return Err(EmpireError::Io(e)),
        };
        Self::parse(&content, DatabaseFormat::from_path(path), path).map(Some)
    }

    /// Decode database text in the given encoding.
    pub fn parse(content: &str, format: DatabaseFormat, origin: &Path) -> EmpireResult<Self> {
        let parse_err = |detail: String| EmpireError::DatabaseParse {
            path: origin.to_path_buf(),
            detail,
        };
        match format {
            DatabaseFormat::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
            DatabaseFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))
            }
            DatabaseFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))
            }
        }
    }

    /// Encode in the given format.
    pub fn render(&self, format: DatabaseFormat) -> EmpireResult<String> {
        let serialized = match format {
            DatabaseFormat::Toml => toml::to_string(self).map_err(|e| e.to_string()),
            DatabaseFormat::Json => serde_json::to_string_pretty(self).map_err(|e| e.to_string()),
            DatabaseFormat::Yaml => serde_yaml::to_string(self).map_err(|e| e.to_string()),
        };
        serialized.map_err(EmpireError::Serialize)
    }

    /// Write the database, replacing any existing file via a temporary
    /// sibling.
    pub fn save(&self, path: &Path) -> EmpireResult<()> {
        let content = self.render(DatabaseFormat::from_path(path))?;
        let tmp = temporary_sibling(path);
        let write_err = |source| EmpireError::DatabaseWrite {
            path: path.to_path_buf(),
            source,
        };
        std::fs::write(&tmp, content).map_err(write_err)?;
        std::fs::rename(&tmp, path).map_err(write_err)?;
        tracing::info!(
            path = %path.display(),
            records = self.controls.len(),
            "state database saved"
        );
        Ok(())
    }
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StateDatabase {
        StateDatabase {
            controls: vec![
                StateRecord {
                    uid: "ASVS-V1.1.1".to_string(),
                    state: "checked".to_string(),
                    statement: "ok".to_string(),
                },
                StateRecord {
                    uid: "ASVS-V1.1.2".to_string(),
                    state: "unchecked".to_string(),
                    statement: String::new(),
                },
            ],
        }
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(DatabaseFormat::from_path(Path::new("s.json")), DatabaseFormat::Json);
        assert_eq!(DatabaseFormat::from_path(Path::new("s.YML")), DatabaseFormat::Yaml);
        assert_eq!(DatabaseFormat::from_path(Path::new("s.yaml")), DatabaseFormat::Yaml);
        assert_eq!(DatabaseFormat::from_path(Path::new("s.toml")), DatabaseFormat::Toml);
        assert_eq!(DatabaseFormat::from_path(Path::new("state")), DatabaseFormat::Toml);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = StateDatabase::load(&dir.path().join("state.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn save_then_load_each_format() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["state.toml", "state.json", "state.yaml"] {
            let path = dir.path().join(name);
            sample().save(&path).unwrap();
            assert!(!dir.path().join(format!("{name}.tmp")).exists());
            let loaded = StateDatabase::load(&path).unwrap().unwrap();
            assert_eq!(loaded, sample(), "{name}");
        }
    }

    #[test]
    fn toml_uses_array_of_tables() {
        let text = sample().render(DatabaseFormat::Toml).unwrap();
        assert!(text.contains("[[controls]]"));
        assert!(text.contains("uid = \"ASVS-V1.1.1\""));
    }

    #[test]
    fn missing_statement_defaults_to_empty() {
        let text = "[[controls]]\nuid = \"W-1\"\nstate = \"checked\"\n";
        let db = StateDatabase::parse(text, DatabaseFormat::Toml, Path::new("s.toml")).unwrap();
        assert_eq!(db.controls[0].statement, "");
    }

    #[test]
    fn malformed_database_names_the_file() {
        let err = StateDatabase::parse("{not json", DatabaseFormat::Json, Path::new("s.json"))
            .unwrap_err();
        assert!(format!("{err}").contains("s.json"));
    }

    #[test]
    fn missing_uid_is_rejected() {
        let text = "[[controls]]\nstate = \"checked\"\n";
        let err =
            StateDatabase::parse(text, DatabaseFormat::Toml, Path::new("s.toml")).unwrap_err();
        assert!(format!("{err}").contains("uid"));
    }
}
