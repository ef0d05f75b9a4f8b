//! # cbx-pack — Checklist Sections and Format Loaders
//!
//! A [`Section`] is one imported checklist document. It owns a loader per
//! supported schema; every loader maps its external layout onto the same
//! four-level tree so downstream consumers never branch on format:
//!
//! | Format | Groups | Items | Controls |
//! |---|---|---|---|
//! | ASVS JSON | `Requirements[]` | nested `Items[]` | nested `Items[]` |
//! | ISVS JSON | one synthetic group | one synthetic item | flat records |
//! | MASVS YAML | `groups[]` | one synthetic item per group | `controls[]` |
//! | WSTG JSON | `categories` entries | `tests[]` | `objectives[]`, shortcode = SHA-256 of the text |
//!
//! ## Failure Semantics
//!
//! Source documents are decoded into typed records ([`loader`]). A missing
//! or mistyped key aborts the load of that section with the decoder's
//! message, which names the field and position. Nothing is partially
//! appended on failure: the section is populated only after decoding
//! succeeds.

pub mod error;
pub mod format;
pub mod loader;
pub mod parser;
pub mod section;

pub use error::{PackError, PackResult};
pub use format::FileType;
pub use loader::ChecklistDocument;
pub use section::Section;
