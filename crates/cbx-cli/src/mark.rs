//! # `cbx mark`: record a disposition
//!
//! Applies one state change and saves the state database. A rejected state
//! token or an unknown uid exits 1 without saving.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use cbx_core::ControlState;
use cbx_empire::{Empire, MarkOutcome};

/// Arguments for `cbx mark`.
#[derive(Args, Debug)]
pub struct MarkArgs {
    /// uid of the control.
    pub uid: String,

    /// New state: `unchecked`, `checked` or `not_relevant`.
    pub state: String,

    /// Justification stored with the state.
    #[arg(long, default_value = "")]
    pub statement: String,
}

/// Execute `cbx mark`.
pub fn run_mark(args: &MarkArgs, config: &Path) -> Result<u8> {
    let mut empire = crate::load_empire(config)?;
    apply_mark(&mut empire, args)
}

/// Apply the mark and persist on success.
pub fn apply_mark(empire: &mut Empire, args: &MarkArgs) -> Result<u8> {
    match empire.mark(&args.uid, &args.state, &args.statement) {
        MarkOutcome::Applied(state) => {
            println!("{} -> {}", args.uid, state);
            if !empire.save_database()? {
                println!("no database_file configured; change not persisted");
            }
            Ok(0)
        }
        MarkOutcome::UnknownUid => {
            println!("no control with uid {}", args.uid);
            Ok(1)
        }
        MarkOutcome::Rejected(err) => {
            println!("{err}");
            println!("choose one of: {}", ControlState::tokens().join(", "));
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    fn args(uid: &str, state: &str, statement: &str) -> MarkArgs {
        MarkArgs {
            uid: uid.to_string(),
            state: state.to_string(),
            statement: statement.to_string(),
        }
    }

    #[test]
    fn mark_persists_to_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = testutil::project(dir.path(), true);
        assert_eq!(run_mark(&args("I-V1.1.1", "checked", "ok"), &config).unwrap(), 0);

        let empire = crate::load_empire(&config).unwrap();
        let control = empire.find_by_uid("I-V1.1.1").unwrap();
        assert_eq!(control.state(), ControlState::Checked);
        assert_eq!(control.statement(), Some("ok"));
    }

    #[test]
    fn invalid_state_exits_one_without_saving() {
        let dir = tempfile::tempdir().unwrap();
        let config = testutil::project(dir.path(), true);
        assert_eq!(run_mark(&args("I-V1.1.1", "done", "x"), &config).unwrap(), 1);
        assert!(!dir.path().join("state.toml").exists());
    }

    #[test]
    fn unknown_uid_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let config = testutil::project(dir.path(), true);
        assert_eq!(run_mark(&args("X-1", "checked", ""), &config).unwrap(), 1);
        assert!(!dir.path().join("state.toml").exists());
    }

    #[test]
    fn mark_without_database_still_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let config = testutil::project(dir.path(), false);
        assert_eq!(run_mark(&args("I-V1.1.1", "not_relevant", ""), &config).unwrap(), 0);
    }
}
