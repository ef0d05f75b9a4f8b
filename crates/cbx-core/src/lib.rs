#![deny(missing_docs)]

//! # cbx-core — Foundational Types for Checkbox Empire
//!
//! Every other crate in the workspace depends on `cbx-core`; it depends on
//! nothing internal.
//!
//! ## Contents
//!
//! - [`ControlState`]: the closed three-variant disposition of a control.
//!   Unknown tokens are rejected when parsed, never deep inside a mutation.
//! - [`Control`], [`Item`], [`Group`]: the lower three levels of the
//!   section → group → item → control tree. Sections live in `cbx-pack`
//!   because they own the format loaders.
//! - [`snapshot`]: plain serializable mirrors of the tree, the one contract
//!   consumed by exporters and report renderers.
//! - [`digest`]: SHA-256 hex digests used to derive stable shortcodes.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cbx-*` crates.
//! - No `.unwrap()` outside tests.

pub mod control;
pub mod digest;
pub mod error;
pub mod group;
pub mod item;
pub mod snapshot;
pub mod state;

pub use control::Control;
pub use digest::sha256_hex;
pub use error::CbxError;
pub use group::Group;
pub use item::Item;
pub use snapshot::{
    ControlSnapshot, EmpireSnapshot, GroupSnapshot, ItemSnapshot, SectionSnapshot,
};
pub use state::{ControlState, StatementPolicy, STATEMENT_POLICY};

/// Placeholder written into metadata fields a source format does not carry.
pub const PLACEHOLDER: &str = "None";
