//! # Empire — The Project Aggregate
//!
//! Owns every section of a project, the tag table, and the location of the
//! persisted state database. All lookups and mutations go through a uid
//! index rebuilt whenever the section list changes. The first control met
//! in depth-first order owns a uid; later controls with the same uid are
//! recorded in [`Empire::duplicate_uids`] and are unreachable by uid.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use cbx_core::{CbxError, Control, ControlState, EmpireSnapshot};
use cbx_pack::Section;

use crate::config::ProjectConfig;
use crate::database::{StateDatabase, StateRecord};
use crate::error::{EmpireError, EmpireResult};
use crate::tags::{TagTable, UidPattern, NOT_REQUIRED_STATEMENT};

/// Position of a control inside the section tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ControlPath {
    section: usize,
    group: usize,
    item: usize,
    control: usize,
}

/// Result of [`Empire::mark`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The control now holds this state.
    Applied(ControlState),
    /// No control has the uid; nothing changed.
    UnknownUid,
    /// The state token was not recognised; the state is unchanged.
    Rejected(CbxError),
}

impl MarkOutcome {
    /// Whether the state was applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// The aggregate root of a checklist project.
#[derive(Debug, Clone)]
pub struct Empire {
    project: String,
    sections: Vec<Section>,
    database_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    tag_table: TagTable,
    index: HashMap<String, ControlPath>,
    duplicates: Vec<String>,
}

impl Default for Empire {
    fn default() -> Self {
        Self::new("")
    }
}

impl Empire {
    /// An empty project using the built-in tag table.
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            sections: Vec::new(),
            database_file: None,
            config_file: None,
            tag_table: TagTable::builtin(),
            index: HashMap::new(),
            duplicates: Vec::new(),
        }
    }

    /// Replace the tag table.
    pub fn with_tag_table(mut self, tag_table: TagTable) -> Self {
        self.tag_table = tag_table;
        self
    }

    /// Set the database location used by [`load_database`](Self::load_database)
    /// and [`save_database`](Self::save_database).
    pub fn with_database_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_file = Some(path.into());
        self
    }

    /// Read a configuration file and build the project from it.
    pub fn load_config(path: &Path) -> EmpireResult<Self> {
        let config = ProjectConfig::load(path)?;
        let mut empire = Self::from_config(&config)?;
        empire.config_file = Some(path.to_path_buf());
        Ok(empire)
    }

    /// Build a project from a decoded configuration: load every section,
    /// index uids, apply tag overrides, then replay the state database.
    pub fn from_config(config: &ProjectConfig) -> EmpireResult<Self> {
        let mut tag_table = TagTable::builtin();
        tag_table.extend_from(&config.tag_patterns)?;

        let mut empire = Self::new(config.project.as_str()).with_tag_table(tag_table);
        empire.database_file = config.database_path();

        for (key, section_config) in config.sections.iter() {
            let mut section = Section::new(
                section_config.name.as_str(),
                section_config.prefix.as_str(),
                section_config.description.as_str(),
            );
            let data_file = config.resolve(&section_config.data_file);
            section
                .load(section_config.file_type, &data_file)
                .map_err(|source| EmpireError::SectionLoad {
                    key: key.clone(),
                    source,
                })?;
            empire.sections.push(section);
        }
        empire.rebuild_index();

        empire.apply_project_tags(
            config
                .project_tags
                .iter()
                .map(|(tag, enabled)| (tag.as_str(), *enabled)),
        );
        empire.load_database()?;

        tracing::info!(
            project = %empire.project,
            sections = empire.sections.len(),
            controls = empire.controls().count(),
            "project loaded"
        );
        Ok(empire)
    }

    /// Project name.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Sections in configuration order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Configured database location.
    pub fn database_file(&self) -> Option<&Path> {
        self.database_file.as_deref()
    }

    /// Configuration file this project was loaded from.
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// The tag table in effect.
    pub fn tag_table(&self) -> &TagTable {
        &self.tag_table
    }

    /// Append a section and re-index.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
        self.rebuild_index();
    }

    /// Every control, depth-first.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.sections.iter().flat_map(Section::controls)
    }

    /// uids shared by more than one control, in discovery order.
    pub fn duplicate_uids(&self) -> &[String] {
        &self.duplicates
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        self.duplicates.clear();
        for (s, section) in self.sections.iter().enumerate() {
            for (g, group) in section.groups().iter().enumerate() {
                for (i, item) in group.items.iter().enumerate() {
                    for (c, control) in item.controls.iter().enumerate() {
                        let path = ControlPath {
                            section: s,
                            group: g,
                            item: i,
                            control: c,
                        };
                        match self.index.entry(control.uid()) {
                            Entry::Vacant(slot) => {
                                slot.insert(path);
                            }
                            Entry::Occupied(slot) => {
                                tracing::warn!(uid = %slot.key(), "duplicate uid; first control wins");
                                if !self.duplicates.contains(slot.key()) {
                                    self.duplicates.push(slot.key().clone());
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Look up a control by uid.
    pub fn find_by_uid(&self, uid: &str) -> Option<&Control> {
        let path = self.index.get(uid)?;
        self.sections[path.section].groups()[path.group].items[path.item]
            .controls
            .get(path.control)
    }

    fn find_by_uid_mut(&mut self, uid: &str) -> Option<&mut Control> {
        let path = *self.index.get(uid)?;
        self.sections[path.section].groups_mut()[path.group].items[path.item]
            .controls
            .get_mut(path.control)
    }

    /// Set the state of the control with `uid` from a canonical token.
    ///
    /// An unknown uid changes nothing. A rejected token leaves the state
    /// unchanged and carries the valid tokens.
    pub fn mark(&mut self, uid: &str, token: &str, statement: &str) -> MarkOutcome {
        let Some(control) = self.find_by_uid_mut(uid) else {
            tracing::warn!(uid, "no control with this uid");
            return MarkOutcome::UnknownUid;
        };
        match control.set_state(token, statement) {
            Ok(state) => MarkOutcome::Applied(state),
            Err(err) => MarkOutcome::Rejected(err),
        }
    }

    /// Apply project tags. Every tag set to `false` forces the controls
    /// matching its patterns to `not_relevant`. Returns the number of
    /// controls changed.
    pub fn apply_project_tags<'a, I>(&mut self, tags: I) -> usize
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut changed = 0;
        for (tag, enabled) in tags {
            if enabled {
                continue;
            }
            let Some(patterns) = self.tag_table.patterns(tag) else {
                tracing::warn!(tag, "unknown project tag ignored");
                continue;
            };
            let mut uids: Vec<String> = patterns
                .iter()
                .flat_map(|pattern| self.matching_uids(pattern))
                .collect();
            uids.sort();
            uids.dedup();
            for uid in &uids {
                if let Some(control) = self.find_by_uid_mut(uid) {
                    control.set(ControlState::NotRelevant, NOT_REQUIRED_STATEMENT);
                    changed += 1;
                }
            }
            tracing::info!(tag, controls = uids.len(), "tag override applied");
        }
        changed
    }

    fn matching_uids(&self, pattern: &UidPattern) -> Vec<String> {
        match pattern {
            UidPattern::Literal(uid) if self.index.contains_key(uid) => vec![uid.clone()],
            UidPattern::Literal(_) => Vec::new(),
            UidPattern::Glob { .. } => self
                .index
                .keys()
                .filter(|uid| pattern.matches(uid))
                .cloned()
                .collect(),
        }
    }

    /// Replay the configured state database. Without a configured
    /// database, or when the file does not exist yet, nothing happens.
    /// Returns the number of records applied.
    pub fn load_database(&mut self) -> EmpireResult<usize> {
        match self.database_file.clone() {
            Some(path) => self.load_database_from(&path),
            None => Ok(0),
        }
    }

    /// Replay a state database from `path`.
    pub fn load_database_from(&mut self, path: &Path) -> EmpireResult<usize> {
        match StateDatabase::load(path)? {
            Some(database) => Ok(self.apply_database(&database)),
            None => Ok(0),
        }
    }

    /// Replay records by uid. Records with unknown uids are skipped, as are
    /// records with unknown state tokens.
    pub fn apply_database(&mut self, database: &StateDatabase) -> usize {
        let mut applied = 0;
        for record in &database.controls {
            let state = match record.state.parse::<ControlState>() {
                Ok(state) => state,
                Err(err) => {
                    tracing::warn!(uid = %record.uid, error = %err, "skipping stored record");
                    continue;
                }
            };
            match self.find_by_uid_mut(&record.uid) {
                Some(control) => {
                    control.set(state, &record.statement);
                    applied += 1;
                    tracing::debug!(uid = %record.uid, state = %state, "replayed stored state");
                }
                None => tracing::debug!(uid = %record.uid, "stored uid no longer present"),
            }
        }
        applied
    }

    /// One record per current control, depth-first.
    pub fn database_records(&self) -> StateDatabase {
        StateDatabase {
            controls: self
                .controls()
                .map(|control| StateRecord {
                    uid: control.uid(),
                    state: control.state().as_str().to_string(),
                    statement: control.statement().unwrap_or_default().to_string(),
                })
                .collect(),
        }
    }

    /// Write the state database to the configured location. Returns
    /// `false` when no database is configured.
    pub fn save_database(&self) -> EmpireResult<bool> {
        match self.database_file.as_deref() {
            Some(path) => {
                self.save_database_to(path)?;
                Ok(true)
            }
            None => {
                tracing::warn!(project = %self.project, "no database_file configured; state not saved");
                Ok(false)
            }
        }
    }

    /// Write the state database to `path`.
    pub fn save_database_to(&self, path: &Path) -> EmpireResult<()> {
        self.database_records().save(path)
    }

    /// Plain serializable view of the whole project.
    pub fn to_representation(&self) -> EmpireSnapshot {
        EmpireSnapshot {
            sections: self
                .sections
                .iter()
                .map(Section::to_representation)
                .collect(),
        }
    }

    /// Multi-line rendering of every section.
    pub fn pretty(&self) -> String {
        self.sections.iter().map(Section::pretty).collect()
    }
}
