//! WSTG checklist JSON.
//!
//! `categories` is a mapping from category title to `{id, tests}`; groups
//! follow the mapping's document order. Test objectives carry no
//! identifier, so each control's shortcode is the SHA-256 hex digest of the
//! objective text. Reloading an unchanged file yields the same uids; editing
//! an objective by a single character detaches any stored disposition.

use serde::Deserialize;

use cbx_core::{sha256_hex, Control, Group, Item};

use super::{position, ChecklistDocument};
use crate::format::FileType;
use crate::parser::OrderedEntries;
use crate::section::Section;

/// Top-level WSTG checklist.
#[derive(Debug, Clone, Deserialize)]
pub struct WstgDocument {
    pub categories: OrderedEntries<WstgCategory>,
}

/// A test category (`WSTG-INFO`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct WstgCategory {
    pub id: String,
    pub tests: Vec<WstgTest>,
}

/// A single test case.
#[derive(Debug, Clone, Deserialize)]
pub struct WstgTest {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub reference: Option<String>,
    pub objectives: Vec<String>,
}

impl ChecklistDocument for WstgDocument {
    const FORMAT: FileType = FileType::WstgJson;

    fn populate(self, section: &mut Section) {
        let prefix = section.manual_prefix().to_string();

        for (group_index, (title, category)) in self.categories.into_iter().enumerate() {
            let mut group = Group::new(category.id, position(group_index), title.as_str(), title.as_str());
            for (test_index, test) in category.tests.into_iter().enumerate() {
                let mut item = Item::new(test.id, position(test_index), test.name);
                for (objective_index, objective) in test.objectives.into_iter().enumerate() {
                    item.add_control(Control::new(
                        prefix.as_str(),
                        sha256_hex(&objective),
                        position(objective_index),
                        objective,
                    ));
                }
                group.add_item(item);
            }
            section.add_group(group);
        }
    }
}
