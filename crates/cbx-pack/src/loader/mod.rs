//! # Format Loaders
//!
//! One module per external schema. Each defines typed records mirroring the
//! source layout and implements [`ChecklistDocument`], which turns a decoded
//! document into groups on a [`Section`].
//!
//! Loaders are not idempotent: populating the same section twice appends a
//! second copy of every group.

pub mod asvs;
pub mod isvs;
pub mod masvs;
pub mod wstg;

use serde::de::DeserializeOwned;

use crate::format::FileType;
use crate::section::Section;

pub use asvs::AsvsDocument;
pub use isvs::IsvsDocument;
pub use masvs::MasvsDocument;
pub use wstg::WstgDocument;

/// A decoded checklist document that can populate a section.
pub trait ChecklistDocument: DeserializeOwned {
    /// The source format this document is decoded from.
    const FORMAT: FileType;

    /// Append this document's groups to `section`, creating every control
    /// in the section's uid namespace.
    fn populate(self, section: &mut Section);
}

/// 1-based position, used where a source format gives no ordinal.
pub(crate) fn position(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}
