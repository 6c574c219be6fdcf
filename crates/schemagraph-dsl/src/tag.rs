//! Authority-domain tags.
//!
//! Tags are facets for downstream consumers. They are carried through
//! assembly uninterpreted: a tag outside [`KNOWN_AUTHORITY_DOMAINS`] is still a
//! valid tag.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Authority domains in use by the current declaration corpus.
pub const KNOWN_AUTHORITY_DOMAINS: &[&str] = &[
    "Conflict",
    "Economy",
    "Institutions",
    "Language",
    "Military",
    "Religion",
    "Social Complexity",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        KNOWN_AUTHORITY_DOMAINS.contains(&self.0.as_str())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_tags() {
        assert!(Tag::from("Military").is_known());
        assert!(!Tag::from("Astronomy").is_known());
    }
}
