//! ISVS JSON export.
//!
//! The export is a flat list of requirement records with no usable grouping,
//! so the whole file is placed under one synthetic group holding one
//! synthetic item. CWE and NIST references are not part of the format.

use serde::Deserialize;

use cbx_core::{Control, Group, Item, PLACEHOLDER};

use super::{position, ChecklistDocument};
use crate::format::FileType;
use crate::section::Section;

/// The whole ISVS export: a list of requirement records.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct IsvsDocument {
    pub requirements: Vec<IsvsRequirement>,
}

/// A single ISVS requirement. Fields other than `ID` and `Description` are
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct IsvsRequirement {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl ChecklistDocument for IsvsDocument {
    const FORMAT: FileType = FileType::IsvsJson;

    fn populate(self, section: &mut Section) {
        let prefix = section.manual_prefix().to_string();
        let mut group = Group::new(PLACEHOLDER, 1, PLACEHOLDER, PLACEHOLDER);
        let mut item = Item::new(PLACEHOLDER, 1, PLACEHOLDER);
        for (index, requirement) in self.requirements.into_iter().enumerate() {
            item.add_control(Control::new(
                prefix.as_str(),
                requirement.id,
                position(index),
                requirement.description,
            ));
        }
        group.add_item(item);
        section.add_group(group);
    }
}
