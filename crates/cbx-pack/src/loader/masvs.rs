//! MASVS YAML.
//!
//! MASVS has two levels: groups (`MASVS-STORAGE`, ...) holding controls.
//! Each group gets one synthetic item numbered after the group index.
//! Controls arrive with a `statement` that is seeded as the control's
//! statement at import; a later user-set statement replaces it.

use serde::Deserialize;

use cbx_core::{Control, Group, Item, PLACEHOLDER};

use super::{position, ChecklistDocument};
use crate::format::FileType;
use crate::section::Section;

/// Top-level MASVS document.
#[derive(Debug, Clone, Deserialize)]
pub struct MasvsDocument {
    #[serde(default)]
    pub metadata: Option<MasvsMetadata>,
    pub groups: Vec<MasvsGroup>,
}

/// Optional document metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MasvsMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// A control group.
#[derive(Debug, Clone, Deserialize)]
pub struct MasvsGroup {
    pub id: String,
    pub index: u32,
    pub title: String,
    pub description: String,
    pub controls: Vec<MasvsControl>,
}

/// A single control.
#[derive(Debug, Clone, Deserialize)]
pub struct MasvsControl {
    pub id: String,
    pub statement: String,
    pub description: String,
}

impl ChecklistDocument for MasvsDocument {
    const FORMAT: FileType = FileType::MasvsYaml;

    fn populate(self, section: &mut Section) {
        if let Some(meta) = self.metadata {
            let or_placeholder = |v: Option<String>| v.unwrap_or_else(|| PLACEHOLDER.to_string());
            section.set_data_metadata(
                or_placeholder(meta.title),
                PLACEHOLDER.to_string(),
                or_placeholder(meta.version),
                or_placeholder(meta.remarks),
            );
        }
        let prefix = section.manual_prefix().to_string();

        for masvs_group in self.groups {
            let mut group = Group::new(
                masvs_group.id,
                masvs_group.index,
                masvs_group.title,
                masvs_group.description,
            );
            let mut item = Item::new(masvs_group.index.to_string(), masvs_group.index, PLACEHOLDER);
            for (index, masvs_control) in masvs_group.controls.into_iter().enumerate() {
                item.add_control(
                    Control::new(
                        prefix.as_str(),
                        masvs_control.id,
                        position(index),
                        masvs_control.description,
                    )
                    .with_statement(masvs_control.statement),
                );
            }
            group.add_item(item);
            section.add_group(group);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbx_core::ControlState;
    use std::path::Path;

    const SAMPLE: &str = r#"
metadata:
  title: Mobile Application Security Verification Standard (MASVS)
  version: v2.0.0
  remarks: Stable release
groups:
  - id: MASVS-STORAGE
    index: 1
    title: Storage
    description: Secure storage of sensitive data on a device.
    controls:
      - id: MASVS-STORAGE-1
        statement: The app securely stores sensitive data.
        description: This control ensures that sensitive data is stored securely.
      - id: MASVS-STORAGE-2
        statement: The app prevents leakage of sensitive data.
        description: This control covers unintentional data leaks.
  - id: MASVS-CRYPTO
    index: 2
    title: Cryptography
    description: Cryptography best practices.
    controls:
      - id: MASVS-CRYPTO-1
        statement: The app employs current strong cryptography.
        description: Use industry best practices.
"#;

    fn load() -> Section {
        let mut section = Section::new("Mobile", "MASVS", "");
        section
            .load_document_str::<MasvsDocument>(SAMPLE, Path::new("masvs.yaml"))
            .unwrap();
        section
    }

    #[test]
    fn one_synthetic_item_per_group() {
        let section = load();
        assert_eq!(section.groups().len(), 2);
        for group in section.groups() {
            assert_eq!(group.items.len(), 1);
            assert_eq!(group.items[0].shortcode, group.ordinal.to_string());
            assert_eq!(group.items[0].name, "None");
        }
    }

    #[test]
    fn group_fields_mapped() {
        let section = load();
        let group = &section.groups()[1];
        assert_eq!(group.shortcode, "MASVS-CRYPTO");
        assert_eq!(group.ordinal, 2);
        assert_eq!(group.shortname, "Cryptography");
    }

    #[test]
    fn statement_seeded_from_source() {
        let section = load();
        let control = &section.groups()[0].items[0].controls[0];
        assert_eq!(control.uid(), "MASVS-MASVS-STORAGE-1");
        assert_eq!(control.statement(), Some("The app securely stores sensitive data."));
        assert_eq!(control.state(), ControlState::Unchecked);
    }

    #[test]
    fn metadata_fills_data_fields() {
        let section = load();
        assert_eq!(section.data_version(), "v2.0.0");
        assert_eq!(section.data_shortname(), "None");
    }

    #[test]
    fn metadata_is_optional() {
        let without = SAMPLE.split("groups:").nth(1).unwrap();
        let mut section = Section::new("Mobile", "MASVS", "");
        section
            .load_document_str::<MasvsDocument>(
                &format!("groups:{without}"),
                Path::new("masvs.yaml"),
            )
            .unwrap();
        assert_eq!(section.data_name(), "None");
        assert_eq!(section.groups().len(), 2);
    }

    #[test]
    fn control_without_statement_is_fatal() {
        let broken = SAMPLE.replace("        statement: The app employs current strong cryptography.\n", "");
        let mut section = Section::new("Mobile", "MASVS", "");
        let err = section
            .load_document_str::<MasvsDocument>(&broken, Path::new("masvs.yaml"))
            .unwrap_err();
        assert!(format!("{err}").contains("statement"));
    }
}
