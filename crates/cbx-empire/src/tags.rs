//! # Tag Overrides
//!
//! Project tags describe characteristics such as "has a login" or "uses
//! SQL". A tag explicitly set to `false` marks every control matching the
//! tag's uid patterns as `not_relevant` with [`NOT_REQUIRED_STATEMENT`].
//! Tags set to `true`, or absent from the table, change nothing.
//!
//! A pattern containing glob metacharacters (`*`, `?`, `[`, `{`) is
//! compiled with `globset`; any other string is a literal uid.

use std::collections::BTreeMap;

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{EmpireError, EmpireResult};

/// Statement recorded on controls switched off by a tag.
pub const NOT_REQUIRED_STATEMENT: &str = "Project does not require that.";

/// Built-in tag table. Patterns target ASVS chapters and MASVS control ids
/// under any section prefix.
pub const BUILTIN_TAG_PATTERNS: &[(&str, &[&str])] = &[
    ("has_login", &["*-V1.2.*", "*-V2.*"]),
    ("has_sessions", &["*-V3.*"]),
    ("uses_sql", &["*-V5.3.4", "*-V5.3.5"]),
    ("has_file_upload", &["*-V12.*"]),
    ("uses_crypto", &["*-V6.*"]),
    ("is_webapp", &["*-V3.4.*", "*-V14.4.*"]),
    ("has_api", &["*-V13.*"]),
    ("is_mobile_app", &["*-MASVS-*"]),
    ("stores_personal_data", &["*-V8.3.*"]),
    ("uses_xml", &["*-V5.5.2", "*-V13.3.*"]),
];

/// A literal uid or a compiled uid glob.
#[derive(Debug, Clone)]
pub enum UidPattern {
    /// Matches exactly one uid string.
    Literal(String),
    /// Matches every uid the glob accepts.
    Glob {
        /// The pattern as written.
        pattern: String,
        /// The compiled matcher.
        matcher: GlobMatcher,
    },
}

impl UidPattern {
    /// Classify and compile a pattern.
    pub fn parse(pattern: &str) -> Result<Self, globset::Error> {
        if !pattern.contains(['*', '?', '[', '{']) {
            return Ok(Self::Literal(pattern.to_string()));
        }
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(false)
            .build()?
            .compile_matcher();
        Ok(Self::Glob {
            pattern: pattern.to_string(),
            matcher,
        })
    }

    /// Whether `uid` matches.
    pub fn matches(&self, uid: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == uid,
            Self::Glob { matcher, .. } => matcher.is_match(uid),
        }
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(literal) => literal,
            Self::Glob { pattern, .. } => pattern,
        }
    }

    /// Whether this is a literal uid.
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// Mapping of tag name to uid patterns.
#[derive(Debug, Clone, Default)]
pub struct TagTable {
    rules: BTreeMap<String, Vec<UidPattern>>,
}

impl TagTable {
    /// Build a table from `(tag, patterns)` definitions.
    pub fn from_definitions<'a, I, P>(definitions: I) -> EmpireResult<Self>
    where
        I: IntoIterator<Item = (&'a str, P)>,
        P: IntoIterator<Item = &'a str>,
    {
        let mut table = Self::default();
        for (tag, patterns) in definitions {
            table.insert(tag, patterns)?;
        }
        Ok(table)
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        let definitions = BUILTIN_TAG_PATTERNS
            .iter()
            .map(|(tag, patterns)| (*tag, patterns.iter().copied()));
        match Self::from_definitions(definitions) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!(error = %e, "built-in tag table failed to compile");
                Self::default()
            }
        }
    }

    /// Add a tag, replacing any existing patterns for it.
    pub fn insert<'a, P>(&mut self, tag: &str, patterns: P) -> EmpireResult<()>
    where
        P: IntoIterator<Item = &'a str>,
    {
        let compiled = patterns
            .into_iter()
            .map(|p| {
                UidPattern::parse(p).map_err(|source| EmpireError::InvalidPattern {
                    tag: tag.to_string(),
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<EmpireResult<Vec<_>>>()?;
        self.rules.insert(tag.to_string(), compiled);
        Ok(())
    }

    /// Apply per-project additions or replacements.
    pub fn extend_from(&mut self, overrides: &BTreeMap<String, Vec<String>>) -> EmpireResult<()> {
        for (tag, patterns) in overrides {
            self.insert(tag, patterns.iter().map(String::as_str))?;
        }
        Ok(())
    }

    /// Patterns for `tag`, if the tag is known.
    pub fn patterns(&self, tag: &str) -> Option<&[UidPattern]> {
        self.rules.get(tag).map(Vec::as_slice)
    }

    /// Known tag names, sorted.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Number of known tags.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
