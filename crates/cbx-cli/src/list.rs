//! # `cbx list`
//!
//! Optional filters narrow the listing by disposition (`--state`) or by
//! ASVS level (`--level`). Controls without level data never match a level
//! filter.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use cbx_core::{Control, ControlState};
use cbx_empire::Empire;

/// Arguments for `cbx list`.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only controls in this state (`unchecked`, `checked`, `not_relevant`).
    #[arg(long)]
    pub state: Option<ControlState>,

    /// Only controls required at this level, e.g. `L1`.
    #[arg(long)]
    pub level: Option<String>,
}

impl ListArgs {
    fn accepts(&self, control: &Control) -> bool {
        let state_ok = self.state.map_or(true, |state| control.state() == state);
        let level_ok = self.level.as_deref().map_or(true, |level| {
            control.levels.iter().any(|l| l.eq_ignore_ascii_case(level))
        });
        state_ok && level_ok
    }
}

/// Execute `cbx list`.
pub fn run_list(args: &ListArgs, config: &Path) -> Result<u8> {
    let empire = crate::load_empire(config)?;
    let lines = list_lines(&empire, args);
    for line in &lines {
        println!("{line}");
    }
    tracing::info!(shown = lines.len(), "listed controls");
    Ok(0)
}

/// Rendered lines of every control passing the filters, depth-first.
pub fn list_lines(empire: &Empire, args: &ListArgs) -> Vec<String> {
    empire
        .controls()
        .filter(|control| args.accepts(control))
        .map(Control::pretty)
        .collect()
}
