//! # Item — Controls Under One Sub-Topic

use crate::control::Control;
use crate::snapshot::ItemSnapshot;

/// An ordered collection of controls under one sub-topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Identifier within the owning group.
    pub shortcode: String,
    /// Display order.
    pub ordinal: u32,
    /// Human-readable name.
    pub name: String,
    /// Owned controls, in source order.
    pub controls: Vec<Control>,
}

impl Item {
    /// Create an empty item.
    pub fn new(shortcode: impl Into<String>, ordinal: u32, name: impl Into<String>) -> Self {
        Self {
            shortcode: shortcode.into(),
            ordinal,
            name: name.into(),
            controls: Vec::new(),
        }
    }

    /// Append a control.
    pub fn add_control(&mut self, control: Control) {
        self.controls.push(control);
    }

    /// Plain serializable view of this item and its controls.
    pub fn to_representation(&self) -> ItemSnapshot {
        ItemSnapshot {
            shortcode: self.shortcode.clone(),
            ordinal: self.ordinal,
            name: self.name.clone(),
            controls: self.controls.iter().map(Control::to_representation).collect(),
        }
    }

    /// Header block followed by one line per control.
    pub fn pretty(&self) -> String {
        let mut out = format!("        Item {}  {}\n", self.shortcode, self.name);
        for control in &self.controls {
            out.push_str("            ");
            out.push_str(&control.pretty());
            out.push('\n');
        }
        out
    }
}
