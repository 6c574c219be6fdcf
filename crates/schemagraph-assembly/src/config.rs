use serde::{Deserialize, Serialize};

/// Configuration for assembly and schema-document rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Prefix applied to class and property identifiers in the rendered document.
    pub namespace: String,
    /// Graph the schema is written to.
    pub graph: String,
    /// Log a warning for tags outside the known authority-domain vocabulary.
    /// Such tags are accepted either way.
    pub warn_unknown_tags: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            namespace: "scm:".to_string(),
            graph: "schema".to_string(),
            warn_unknown_tags: true,
        }
    }
}

impl AssemblyConfig {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub(crate) fn qualify(&self, identifier: &str) -> String {
        format!("{}{identifier}", self.namespace)
    }
}
