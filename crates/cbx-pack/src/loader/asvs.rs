//! ASVS flat JSON export.
//!
//! The richest schema: three nesting levels of `Requirements` → `Items` →
//! `Items`, each carrying its own shortcode and ordinal, so the mapping onto
//! group → item → control is direct.

use serde::Deserialize;

use cbx_core::{Control, Group, Item};

use super::ChecklistDocument;
use crate::format::FileType;
use crate::section::Section;

/// Top-level ASVS document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AsvsDocument {
    pub name: String,
    pub short_name: String,
    pub version: String,
    pub description: String,
    pub requirements: Vec<AsvsRequirement>,
}

/// A chapter (`V1`, `V2`, ...).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AsvsRequirement {
    pub shortcode: String,
    pub ordinal: u32,
    pub short_name: String,
    pub name: String,
    pub items: Vec<AsvsItem>,
}

/// A section within a chapter (`V1.1`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AsvsItem {
    pub shortcode: String,
    pub ordinal: u32,
    pub name: String,
    pub items: Vec<AsvsControl>,
}

/// A single requirement (`V1.1.1`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AsvsControl {
    pub shortcode: String,
    pub ordinal: u32,
    pub description: String,
    #[serde(rename = "L1", default)]
    pub l1: Option<AsvsLevel>,
    #[serde(rename = "L2", default)]
    pub l2: Option<AsvsLevel>,
    #[serde(rename = "L3", default)]
    pub l3: Option<AsvsLevel>,
    #[serde(rename = "CWE")]
    pub cwe: Vec<u32>,
    #[serde(rename = "NIST")]
    pub nist: Vec<String>,
}

/// One cell of the level requirement matrix.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AsvsLevel {
    pub required: bool,
    #[serde(default)]
    pub requirement: String,
}

impl AsvsControl {
    fn required_levels(&self) -> Vec<String> {
        [("L1", &self.l1), ("L2", &self.l2), ("L3", &self.l3)]
            .into_iter()
            .filter(|(_, level)| matches!(level, Some(l) if l.required))
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

impl ChecklistDocument for AsvsDocument {
    const FORMAT: FileType = FileType::AsvsJson;

    fn populate(self, section: &mut Section) {
        section.set_data_metadata(
            self.name,
            self.short_name,
            self.version,
            self.description,
        );
        let prefix = section.manual_prefix().to_string();

        for requirement in self.requirements {
            let mut group = Group::new(
                requirement.shortcode,
                requirement.ordinal,
                requirement.short_name,
                requirement.name,
            );
            for asvs_item in requirement.items {
                let mut item = Item::new(asvs_item.shortcode, asvs_item.ordinal, asvs_item.name);
                for asvs_control in asvs_item.items {
                    let levels = asvs_control.required_levels();
                    let control = Control::new(
                        prefix.as_str(),
                        asvs_control.shortcode,
                        asvs_control.ordinal,
                        asvs_control.description,
                    )
                    .with_cwe(asvs_control.cwe)
                    .with_nist(asvs_control.nist)
                    .with_levels(levels);
                    item.add_control(control);
                }
                group.add_item(item);
            }
            section.add_group(group);
        }
    }
}
