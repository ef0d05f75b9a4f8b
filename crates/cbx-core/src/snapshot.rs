//! # Snapshot Representation
//!
//! Plain, owned mirrors of the checklist tree. Exporters and report
//! renderers consume these and never the live tree. The serialized shape is
//! a stable contract:
//!
//! ```text
//! {"sections": [{..section fields.., "groups": [{..group fields..,
//!   "items": [{..item fields.., "controls": [{..control fields..}]}]}]}]}
//! ```
//!
//! Field order in each struct is the serialization order. Nested arrays come
//! last so the structs also serialize as TOML tables.

use serde::{Deserialize, Serialize};

/// Snapshot of a whole project.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmpireSnapshot {
    /// Sections in configuration order.
    pub sections: Vec<SectionSnapshot>,
}

/// Snapshot of one imported checklist document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSnapshot {
    /// User-assigned display name.
    pub manual_name: String,
    /// User-assigned uid prefix.
    pub manual_prefix: String,
    /// User-assigned description.
    pub manual_description: String,
    /// Name from the data file.
    pub data_name: String,
    /// Short name from the data file.
    pub data_shortname: String,
    /// Version from the data file.
    pub data_version: String,
    /// Description from the data file.
    pub data_description: String,
    /// Groups in source order.
    pub groups: Vec<GroupSnapshot>,
}

/// Snapshot of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    /// Group identifier.
    pub shortcode: String,
    /// Display order.
    pub ordinal: u32,
    /// Short display name.
    pub shortname: String,
    /// Full name.
    pub name: String,
    /// Items in source order.
    pub items: Vec<ItemSnapshot>,
}

/// Snapshot of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    /// Item identifier.
    pub shortcode: String,
    /// Display order.
    pub ordinal: u32,
    /// Name.
    pub name: String,
    /// Controls in source order.
    pub controls: Vec<ControlSnapshot>,
}

/// Snapshot of a control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSnapshot {
    /// Control identifier within its item.
    pub shortcode: String,
    /// Display order.
    pub ordinal: u32,
    /// Requirement text.
    pub description: String,
    /// CWE identifiers.
    pub cwe: Vec<u32>,
    /// NIST identifiers.
    pub nist: Vec<String>,
    /// Uppercase state name (`UNCHECKED`, `CHECKED`, `NOT_RELEVANT`).
    pub state: String,
    /// Statement, absent when never set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    /// `<prefix>-<shortcode>`.
    pub uid: String,
}

impl EmpireSnapshot {
    /// Every control snapshot, depth-first.
    pub fn controls(&self) -> impl Iterator<Item = &ControlSnapshot> {
        self.sections.iter().flat_map(SectionSnapshot::controls)
    }
}

impl SectionSnapshot {
    /// Every control snapshot in this section, depth-first.
    pub fn controls(&self) -> impl Iterator<Item = &ControlSnapshot> {
        self.groups
            .iter()
            .flat_map(|g| g.items.iter())
            .flat_map(|i| i.controls.iter())
    }
}
