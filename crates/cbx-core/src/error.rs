//! # Error Hierarchy
//!
//! Structured errors for the core tree, built with `thiserror`.

use thiserror::Error;

/// Top-level error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CbxError {
    /// A disposition token did not name one of the three states.
    #[error("unknown state {token:?}; valid states are: {}", valid.join(", "))]
    UnknownState {
        /// The rejected token.
        token: String,
        /// The accepted tokens, in canonical order.
        valid: Vec<&'static str>,
    },
}

impl CbxError {
    /// Build an [`CbxError::UnknownState`] listing every accepted token.
    pub fn unknown_state(token: &str) -> Self {
        Self::UnknownState {
            token: token.to_string(),
            valid: crate::ControlState::tokens().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_state_display_lists_tokens() {
        let err = CbxError::unknown_state("bogus");
        let msg = format!("{err}");
        assert!(msg.contains("\"bogus\""));
        assert!(msg.contains("unchecked, checked, not_relevant"));
    }

    #[test]
    fn unknown_state_is_debug() {
        let err = CbxError::unknown_state("");
        assert!(!format!("{err:?}").is_empty());
    }
}
