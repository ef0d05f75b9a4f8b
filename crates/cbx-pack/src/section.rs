//! # Section — One Imported Checklist Document
//!
//! A section pairs user-assigned metadata (name, prefix, description, fixed
//! at construction) with metadata read from the data file. The prefix is
//! the uid namespace of every control the section's loaders create.
//!
//! A single data file may back several sections, e.g. the same checklist
//! once for planning and once for testing under different prefixes.

use std::path::Path;

use cbx_core::{Control, Group, SectionSnapshot, PLACEHOLDER};

use crate::error::PackResult;
use crate::format::FileType;
use crate::loader::{AsvsDocument, ChecklistDocument, IsvsDocument, MasvsDocument, WstgDocument};
use crate::parser;

/// One imported checklist document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    manual_name: String,
    manual_prefix: String,
    manual_description: String,
    data_name: String,
    data_shortname: String,
    data_version: String,
    data_description: String,
    groups: Vec<Group>,
}

impl Section {
    /// Create an empty section. Data metadata starts as the `"None"` placeholder.
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            manual_name: name.into(),
            manual_prefix: prefix.into(),
            manual_description: description.into(),
            data_name: PLACEHOLDER.to_string(),
            data_shortname: PLACEHOLDER.to_string(),
            data_version: PLACEHOLDER.to_string(),
            data_description: PLACEHOLDER.to_string(),
            groups: Vec::new(),
        }
    }

    /// User-assigned name.
    pub fn manual_name(&self) -> &str {
        &self.manual_name
    }

    /// User-assigned uid prefix.
    pub fn manual_prefix(&self) -> &str {
        &self.manual_prefix
    }

    /// User-assigned description.
    pub fn manual_description(&self) -> &str {
        &self.manual_description
    }

    /// Name from the data file.
    pub fn data_name(&self) -> &str {
        &self.data_name
    }

    /// Short name from the data file.
    pub fn data_shortname(&self) -> &str {
        &self.data_shortname
    }

    /// Version from the data file.
    pub fn data_version(&self) -> &str {
        &self.data_version
    }

    /// Description from the data file.
    pub fn data_description(&self) -> &str {
        &self.data_description
    }

    /// Groups in load order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Mutable access to groups, for disposition changes.
    pub fn groups_mut(&mut self) -> &mut [Group] {
        &mut self.groups
    }

    /// Every control, depth-first.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.groups.iter().flat_map(Group::controls)
    }

    /// Every control, depth-first, mutably.
    pub fn controls_mut(&mut self) -> impl Iterator<Item = &mut Control> {
        self.groups
            .iter_mut()
            .flat_map(|g| g.items.iter_mut())
            .flat_map(|i| i.controls.iter_mut())
    }

    pub(crate) fn set_data_metadata(
        &mut self,
        name: String,
        shortname: String,
        version: String,
        description: String,
    ) {
        self.data_name = name;
        self.data_shortname = shortname;
        self.data_version = version;
        self.data_description = description;
    }

    pub(crate) fn add_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    /// Load `path` with the loader matching `file_type`.
    pub fn load(&mut self, file_type: FileType, path: &Path) -> PackResult<()> {
        match file_type {
            FileType::AsvsJson => self.load_asvs_json(path),
            FileType::IsvsJson => self.load_isvs_json(path),
            FileType::MasvsYaml => self.load_masvs_yaml(path),
            FileType::WstgJson => self.load_wstg_json(path),
        }
    }

    /// Load an ASVS flat JSON export.
    pub fn load_asvs_json(&mut self, path: &Path) -> PackResult<()> {
        self.load_document::<AsvsDocument>(path)
    }

    /// Load an ISVS JSON export.
    pub fn load_isvs_json(&mut self, path: &Path) -> PackResult<()> {
        self.load_document::<IsvsDocument>(path)
    }

    /// Load a MASVS YAML document.
    pub fn load_masvs_yaml(&mut self, path: &Path) -> PackResult<()> {
        self.load_document::<MasvsDocument>(path)
    }

    /// Load a WSTG checklist JSON.
    pub fn load_wstg_json(&mut self, path: &Path) -> PackResult<()> {
        self.load_document::<WstgDocument>(path)
    }

    /// Read, decode and apply a document of type `D` from `path`.
    pub fn load_document<D: ChecklistDocument>(&mut self, path: &Path) -> PackResult<()> {
        let content = parser::read_source(path)?;
        self.load_document_str::<D>(&content, path)
    }

    /// Decode and apply a document of type `D` from text. `origin` is used
    /// for error context and logging only.
    pub fn load_document_str<D: ChecklistDocument>(
        &mut self,
        content: &str,
        origin: &Path,
    ) -> PackResult<()> {
        let document: D = if D::FORMAT.is_yaml() {
            parser::parse_yaml_typed(content, origin)?
        } else {
            parser::parse_json_typed(content, origin)?
        };
        let groups_before = self.groups.len();
        document.populate(self);
        tracing::info!(
            prefix = %self.manual_prefix,
            format = %D::FORMAT,
            file = %origin.display(),
            groups = self.groups.len() - groups_before,
            controls = self.groups[groups_before..].iter().flat_map(Group::controls).count(),
            "loaded section data"
        );
        Ok(())
    }

    /// Plain serializable view of this section.
    pub fn to_representation(&self) -> SectionSnapshot {
        SectionSnapshot {
            manual_name: self.manual_name.clone(),
            manual_prefix: self.manual_prefix.clone(),
            manual_description: self.manual_description.clone(),
            data_name: self.data_name.clone(),
            data_shortname: self.data_shortname.clone(),
            data_version: self.data_version.clone(),
            data_description: self.data_description.clone(),
            groups: self.groups.iter().map(Group::to_representation).collect(),
        }
    }

    /// Multi-line human-readable rendering of the section and its tree.
    pub fn pretty(&self) -> String {
        let mut out = format!(
            "Section {}\n***************\nUser-prefix: {}\nUser-description: {}\n\n\
             Data file\n*********\nName: {}\nShortname: {}\nVersion: {}\nDescription: {}\n\n",
            self.manual_name,
            self.manual_prefix,
            self.manual_description,
            self.data_name,
            self.data_shortname,
            self.data_version,
            self.data_description,
        );
        for group in &self.groups {
            out.push_str(&group.pretty());
        }
        out
    }
}
