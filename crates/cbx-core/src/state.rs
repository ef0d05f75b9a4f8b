//! # Control Disposition — Single Source of Truth
//!
//! Defines [`ControlState`], the closed set of dispositions a control can
//! hold. The three states are a flat set, not a progression: any state is
//! reachable from any other.
//!
//! ## Token Boundary
//!
//! Callers hand in dispositions as canonical tokens (`unchecked`, `checked`,
//! `not_relevant`). Parsing happens once, through [`FromStr`]; an unknown
//! token becomes [`CbxError::UnknownState`] before any control is touched.
//!
//! ## Statement Policy
//!
//! Whether a rejected token still overwrites the stored statement is decided
//! in exactly one place, [`STATEMENT_POLICY`]. The shipped policy keeps the
//! historical behaviour (always overwrite).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CbxError;

/// The disposition of a single control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlState {
    /// Not yet assessed. Initial state of every freshly imported control.
    #[default]
    Unchecked,
    /// Assessed and satisfied.
    Checked,
    /// Does not apply to this project.
    NotRelevant,
}

impl ControlState {
    /// All states in canonical order.
    pub fn all() -> &'static [ControlState] {
        &[Self::Unchecked, Self::Checked, Self::NotRelevant]
    }

    /// All accepted tokens in canonical order.
    pub fn tokens() -> &'static [&'static str] {
        &["unchecked", "checked", "not_relevant"]
    }

    /// The canonical lowercase token, as accepted by [`FromStr`] and
    /// stored in the state database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unchecked => "unchecked",
            Self::Checked => "checked",
            Self::NotRelevant => "not_relevant",
        }
    }

    /// The uppercase state name used in snapshots and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unchecked => "UNCHECKED",
            Self::Checked => "CHECKED",
            Self::NotRelevant => "NOT_RELEVANT",
        }
    }
}

impl std::fmt::Display for ControlState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlState {
    type Err = CbxError;

    /// Parse a canonical token. Matching is exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unchecked" => Ok(Self::Unchecked),
            "checked" => Ok(Self::Checked),
            "not_relevant" => Ok(Self::NotRelevant),
            other => Err(CbxError::unknown_state(other)),
        }
    }
}

/// What happens to a control's statement when a state change is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementPolicy {
    /// The statement is replaced even though the state stays unchanged.
    AlwaysOverwrite,
    /// The statement is only replaced together with a successful state change.
    OverwriteOnSuccess,
}

impl StatementPolicy {
    /// Whether a rejected state change still writes the statement.
    pub fn overwrites_on_rejection(&self) -> bool {
        matches!(self, Self::AlwaysOverwrite)
    }
}

/// The policy applied by [`Control::set_state`](crate::Control::set_state).
pub const STATEMENT_POLICY: StatementPolicy = StatementPolicy::AlwaysOverwrite;
