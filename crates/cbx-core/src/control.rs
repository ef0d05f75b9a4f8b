//! # Control — a Single Checkable Requirement
//!
//! The leaf of the section → group → item → control tree. A control is
//! created once by a loader, carries the prefix of its owning section, and
//! is mutated only through [`Control::set_state`] / [`Control::apply_state`].

use crate::error::CbxError;
use crate::snapshot::ControlSnapshot;
use crate::state::{ControlState, StatementPolicy, STATEMENT_POLICY};

/// A single checkable compliance requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    /// Identifier, unique within the owning item.
    pub shortcode: String,
    /// Display order.
    pub ordinal: u32,
    /// Requirement text.
    pub description: String,
    /// Related CWE identifiers.
    pub cwe: Vec<u32>,
    /// Related NIST identifiers.
    pub nist: Vec<String>,
    /// Verification levels that require this control (ASVS `L1`..`L3`).
    pub levels: Vec<String>,
    state: ControlState,
    statement: Option<String>,
    section_prefix: String,
}

impl Control {
    /// Create an unchecked control in the namespace of `section_prefix`.
    pub fn new(
        section_prefix: impl Into<String>,
        shortcode: impl Into<String>,
        ordinal: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            shortcode: shortcode.into(),
            ordinal,
            description: description.into(),
            cwe: Vec::new(),
            nist: Vec::new(),
            levels: Vec::new(),
            state: ControlState::Unchecked,
            statement: None,
            section_prefix: section_prefix.into(),
        }
    }

    /// Attach CWE identifiers.
    pub fn with_cwe(mut self, cwe: Vec<u32>) -> Self {
        self.cwe = cwe;
        self
    }

    /// Attach NIST identifiers.
    pub fn with_nist(mut self, nist: Vec<String>) -> Self {
        self.nist = nist;
        self
    }

    /// Attach the verification levels requiring this control.
    pub fn with_levels(mut self, levels: Vec<String>) -> Self {
        self.levels = levels;
        self
    }

    /// Pre-seed the statement at import time.
    pub fn with_statement(mut self, statement: impl Into<String>) -> Self {
        self.statement = Some(statement.into());
        self
    }

    /// The externally stable identity: `<section_prefix>-<shortcode>`.
    ///
    /// An empty prefix still yields the separator (`-<shortcode>`).
    pub fn uid(&self) -> String {
        format!("{}-{}", self.section_prefix, self.shortcode)
    }

    /// The prefix inherited from the owning section.
    pub fn section_prefix(&self) -> &str {
        &self.section_prefix
    }

    /// Current disposition.
    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Statement bound to the most recent state-setting call, or the
    /// statement seeded at import.
    pub fn statement(&self) -> Option<&str> {
        self.statement.as_deref()
    }

    /// Set the disposition from a canonical token under [`STATEMENT_POLICY`].
    ///
    /// On an unknown token the state is left unchanged and the error lists
    /// the valid tokens.
    pub fn set_state(&mut self, token: &str, statement: &str) -> Result<ControlState, CbxError> {
        self.apply_state(token, statement, STATEMENT_POLICY)
    }

    /// Set the disposition from a canonical token under an explicit policy.
    pub fn apply_state(
        &mut self,
        token: &str,
        statement: &str,
        policy: StatementPolicy,
    ) -> Result<ControlState, CbxError> {
        match token.parse::<ControlState>() {
            Ok(state) => {
                self.set(state, statement);
                Ok(state)
            }
            Err(err) => {
                if policy.overwrites_on_rejection() {
                    self.statement = Some(statement.to_string());
                }
                tracing::warn!(
                    uid = %self.uid(),
                    token,
                    valid = ?ControlState::tokens(),
                    "rejected unknown state token"
                );
                Err(err)
            }
        }
    }

    /// Set an already-parsed disposition. The statement is replaced, even
    /// when empty.
    pub fn set(&mut self, state: ControlState, statement: &str) {
        self.state = state;
        self.statement = Some(statement.to_string());
    }

    /// Plain serializable view of this control.
    pub fn to_representation(&self) -> ControlSnapshot {
        ControlSnapshot {
            shortcode: self.shortcode.clone(),
            ordinal: self.ordinal,
            description: self.description.clone(),
            cwe: self.cwe.clone(),
            nist: self.nist.clone(),
            state: self.state.name().to_string(),
            statement: self.statement.clone(),
            uid: self.uid(),
        }
    }

    /// One-line human-readable summary.
    pub fn pretty(&self) -> String {
        let cwe = self
            .cwe
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "- {} [{}] {} CWE: {} NIST: {}",
            self.uid(),
            self.state,
            self.description,
            cwe,
            self.nist.join(",")
        )
    }
}
