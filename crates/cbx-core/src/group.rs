//! # Group — Items Under One Topic

use crate::control::Control;
use crate::item::Item;
use crate::snapshot::GroupSnapshot;

/// An ordered collection of items under one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Identifier within the owning section.
    pub shortcode: String,
    /// Display order.
    pub ordinal: u32,
    /// Short display name.
    pub shortname: String,
    /// Full name.
    pub name: String,
    /// Owned items, in source order.
    pub items: Vec<Item>,
}

impl Group {
    /// Create an empty group.
    pub fn new(
        shortcode: impl Into<String>,
        ordinal: u32,
        shortname: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            shortcode: shortcode.into(),
            ordinal,
            shortname: shortname.into(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Append an item.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// All controls of all items, depth-first.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.items.iter().flat_map(|item| item.controls.iter())
    }

    /// Plain serializable view of this group and everything below it.
    pub fn to_representation(&self) -> GroupSnapshot {
        GroupSnapshot {
            shortcode: self.shortcode.clone(),
            ordinal: self.ordinal,
            shortname: self.shortname.clone(),
            name: self.name.clone(),
            items: self.items.iter().map(Item::to_representation).collect(),
        }
    }

    /// Header block followed by every item.
    pub fn pretty(&self) -> String {
        let mut out = format!(
            "    Group {}  {}\n    Name: {}\n",
            self.shortcode, self.shortname, self.name
        );
        for item in &self.items {
            out.push_str(&item.pretty());
        }
        out
    }
}
