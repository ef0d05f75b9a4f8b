//! Shared JSON/YAML parsing infrastructure.
//!
//! All loaders read their source through these functions so that missing
//! files, I/O failures and decoding failures are reported the same way,
//! always with the offending path attached.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::{PackError, PackResult};

/// Read a source file to a string, mapping `NotFound` to [`PackError::FileNotFound`].
pub fn read_source(path: &Path) -> PackResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PackError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PackError::Io(e)
        }
    })
}

/// Load a JSON file into a strongly-typed struct.
pub fn load_json_typed<T: DeserializeOwned>(path: &Path) -> PackResult<T> {
    let content = read_source(path)?;
    parse_json_typed(&content, path)
}

/// Decode JSON text into a strongly-typed struct; `path` is only used for
/// error context.
pub fn parse_json_typed<T: DeserializeOwned>(content: &str, path: &Path) -> PackResult<T> {
    serde_json::from_str(content).map_err(|e| PackError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a YAML file into a strongly-typed struct.
pub fn load_yaml_typed<T: DeserializeOwned>(path: &Path) -> PackResult<T> {
    let content = read_source(path)?;
    parse_yaml_typed(&content, path)
}

/// Decode YAML text into a strongly-typed struct; `path` is only used for
/// error context.
pub fn parse_yaml_typed<T: DeserializeOwned>(content: &str, path: &Path) -> PackResult<T> {
    serde_yaml::from_str(content).map_err(|e| PackError::YamlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// A mapping decoded as a list of `(key, value)` pairs in document order.
///
/// `serde_json` maps are sorted by key unless `preserve_order` is enabled
/// workspace-wide; decoding through this visitor keeps source order without
/// changing map behaviour anywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedEntries<V>(pub Vec<(String, V)>);

impl<V> OrderedEntries<V> {
    /// Iterate entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, V)> {
        self.0.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for OrderedEntries<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> IntoIterator for OrderedEntries<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedEntries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = OrderedEntries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}
