//! # `cbx show`

use std::path::Path;

use anyhow::Result;
use clap::Args;

use cbx_core::Control;

/// Arguments for `cbx show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// uid of the control, e.g. `ASVS-V2.1.1`.
    pub uid: String,
}

/// Execute `cbx show`. Exits 1 when the uid is unknown.
pub fn run_show(args: &ShowArgs, config: &Path) -> Result<u8> {
    let empire = crate::load_empire(config)?;
    match empire.find_by_uid(&args.uid) {
        Some(control) => {
            println!("{}", describe(control));
            Ok(0)
        }
        None => {
            println!("no control with uid {}", args.uid);
            Ok(1)
        }
    }
}

/// Multi-line details of one control.
pub fn describe(control: &Control) -> String {
    let mut out = control.pretty();
    if !control.levels.is_empty() {
        out.push_str(&format!("\nLevels: {}", control.levels.join(", ")));
    }
    if let Some(statement) = control.statement() {
        out.push_str(&format!("\nStatement: {statement}"));
    }
    out
}
