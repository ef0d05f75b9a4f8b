//! # Source Formats
//!
//! The closed set of checklist schemas a section can be loaded from.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PackError;

/// A supported checklist source format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    /// OWASP Application Security Verification Standard, flat JSON export.
    #[serde(rename = "ASVS_JSON", alias = "OWASP_ASVS_JSON")]
    AsvsJson,
    /// OWASP IoT Security Verification Standard, JSON export.
    #[serde(rename = "ISVS_JSON", alias = "OWASP_ISVS_JSON")]
    IsvsJson,
    /// OWASP Mobile Application Security Verification Standard, YAML.
    #[serde(rename = "MASVS_YAML", alias = "OWASP_MASVS_YAML")]
    MasvsYaml,
    /// OWASP Web Security Testing Guide checklist JSON.
    #[serde(rename = "WSTG_JSON", alias = "OWASP_WSTG_JSON")]
    WstgJson,
}

impl FileType {
    /// All formats.
    pub fn all() -> &'static [FileType] {
        &[Self::AsvsJson, Self::IsvsJson, Self::MasvsYaml, Self::WstgJson]
    }

    /// Canonical configuration tags.
    pub fn tags() -> &'static [&'static str] {
        &["ASVS_JSON", "ISVS_JSON", "MASVS_YAML", "WSTG_JSON"]
    }

    /// Canonical configuration tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AsvsJson => "ASVS_JSON",
            Self::IsvsJson => "ISVS_JSON",
            Self::MasvsYaml => "MASVS_YAML",
            Self::WstgJson => "WSTG_JSON",
        }
    }

    /// Whether the source is YAML rather than JSON.
    pub fn is_yaml(&self) -> bool {
        matches!(self, Self::MasvsYaml)
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = PackError;

    /// Accepts the canonical tags and their `OWASP_`-prefixed spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.strip_prefix("OWASP_").unwrap_or(s);
        match bare {
            "ASVS_JSON" => Ok(Self::AsvsJson),
            "ISVS_JSON" => Ok(Self::IsvsJson),
            "MASVS_YAML" => Ok(Self::MasvsYaml),
            "WSTG_JSON" => Ok(Self::WstgJson),
            _ => Err(PackError::UnknownFormat { tag: s.to_string() }),
        }
    }
}
