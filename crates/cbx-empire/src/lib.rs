//! # cbx-empire — The Project Aggregate
//!
//! An [`Empire`] owns every [`Section`](cbx_pack::Section) of one project
//! and is the sole entry point for uid-based lookup and mutation.
//!
//! ## Load Order
//!
//! [`Empire::load_config`] performs, strictly in this order:
//!
//! 1. Decode the TOML project configuration ([`config`]).
//! 2. Build and load every section in configuration order.
//! 3. Index controls by uid (first match in depth-first order wins).
//! 4. Apply tag overrides ([`tags`]): every tag set to `false` forces the
//!    controls matching its patterns to `not_relevant`.
//! 5. Replay the persisted state database ([`database`]).
//!
//! Because the database is replayed last, a disposition a user recorded
//! always beats a tag-derived default.
//!
//! ## Reports
//!
//! [`report`] renders the [`EmpireSnapshot`](cbx_core::EmpireSnapshot) to
//! HTML or TOML; renderers never see the live tree.

pub mod config;
pub mod database;
pub mod empire;
pub mod error;
pub mod report;
pub mod tags;

pub use config::{ProjectConfig, SectionConfig};
pub use database::{DatabaseFormat, StateDatabase, StateRecord};
pub use empire::{Empire, MarkOutcome};
pub use error::{EmpireError, EmpireResult};
pub use report::{ReportType, StateSummary};
pub use tags::{TagTable, UidPattern, NOT_REQUIRED_STATEMENT};
