//! Class and property declarations, and the factory that builds them.
//!
//! A declaration is built from a compact specification tuple. The tuple shapes
//! are also the JSON input format ([`PropertySpec`], [`ClassSpec`]), and
//! deserialization routes through the same factory functions, so JSON input
//! cannot produce a declaration the Rust API would reject.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tag::Tag;
use crate::value_type::ValueType;

/// Convenience for declarations that carry no authority-domain tags.
pub const NO_TAGS: [&str; 0] = [];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("invalid value type `{value}`")]
    InvalidValueType { value: String },
    #[error("declaration field `{field}` must not be empty")]
    EmptyField { field: &'static str },
}

// ============================================================================
// Property declarations
// ============================================================================

/// Specification tuple for a property, in authoring order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub identifier: String,
    pub value_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub owning_class: String,
}

/// One property of the ontology.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "PropertySpec")]
pub struct PropertyDeclaration {
    identifier: String,
    value_type: ValueType,
    tags: BTreeSet<Tag>,
    label: String,
    description: String,
    owning_class: String,
}

impl PropertyDeclaration {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Tags in lexical order.
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Identifier of the class this property attaches to. Not resolved here.
    pub fn owning_class(&self) -> &str {
        &self.owning_class
    }
}

impl TryFrom<PropertySpec> for PropertyDeclaration {
    type Error = DeclarationError;

    fn try_from(spec: PropertySpec) -> Result<Self, Self::Error> {
        make_property(
            spec.identifier,
            &spec.value_type,
            spec.tags,
            spec.label,
            spec.description,
            spec.owning_class,
        )
    }
}

/// Build a property declaration from its specification tuple.
///
/// Only the value type and the two identifier fields are checked. Tags are
/// passed through as given (unknown authority domains included), and the
/// label and description are free text, stored exactly as written.
pub fn make_property<I, T>(
    identifier: impl Into<String>,
    value_type: &str,
    tags: I,
    label: impl Into<String>,
    description: impl Into<String>,
    owning_class: impl Into<String>,
) -> Result<PropertyDeclaration, DeclarationError>
where
    I: IntoIterator<Item = T>,
    T: Into<Tag>,
{
    let value_type: ValueType = value_type.parse()?;
    Ok(PropertyDeclaration {
        identifier: non_empty("identifier", identifier.into())?,
        value_type,
        tags: tags.into_iter().map(Into::into).collect(),
        label: label.into(),
        description: description.into(),
        owning_class: non_empty("owning_class", owning_class.into())?,
    })
}

// ============================================================================
// Class declarations
// ============================================================================

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    /// A top-level, independently addressable entity type.
    Document,
}

/// Specification tuple for a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSpec {
    pub identifier: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub parents: Vec<String>,
}

/// One entity type of the ontology.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "ClassSpec")]
pub struct ClassDeclaration {
    identifier: String,
    label: String,
    description: String,
    kind: ClassKind,
    parents: BTreeSet<String>,
}

impl ClassDeclaration {
    /// Add a parent class (`subClassOf`). Parents are resolved at assembly.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parents.insert(parent.into());
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn parents(&self) -> &BTreeSet<String> {
        &self.parents
    }
}

impl TryFrom<ClassSpec> for ClassDeclaration {
    type Error = DeclarationError;

    fn try_from(spec: ClassSpec) -> Result<Self, Self::Error> {
        let class = build_class(spec.identifier, spec.label, spec.description, spec.kind)?;
        Ok(spec
            .parents
            .into_iter()
            .fold(class, |class, parent| class.with_parent(parent)))
    }
}

pub fn make_class(
    identifier: impl Into<String>,
    label: impl Into<String>,
    description: impl Into<String>,
) -> Result<ClassDeclaration, DeclarationError> {
    build_class(identifier.into(), label.into(), description.into(), ClassKind::Class)
}

pub fn make_document(
    identifier: impl Into<String>,
    label: impl Into<String>,
    description: impl Into<String>,
) -> Result<ClassDeclaration, DeclarationError> {
    build_class(
        identifier.into(),
        label.into(),
        description.into(),
        ClassKind::Document,
    )
}

fn build_class(
    identifier: String,
    label: String,
    description: String,
    kind: ClassKind,
) -> Result<ClassDeclaration, DeclarationError> {
    Ok(ClassDeclaration {
        identifier: non_empty("identifier", identifier)?,
        label,
        description,
        kind,
        parents: BTreeSet::new(),
    })
}

// ============================================================================
// Declarations
// ============================================================================

/// Either kind of declaration, as it appears in an assembly input sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "declare", rename_all = "snake_case")]
pub enum Declaration {
    Class(ClassDeclaration),
    Property(PropertyDeclaration),
}

impl Declaration {
    pub fn identifier(&self) -> &str {
        match self {
            Declaration::Class(c) => c.identifier(),
            Declaration::Property(p) => p.identifier(),
        }
    }

    pub fn as_class(&self) -> Option<&ClassDeclaration> {
        match self {
            Declaration::Class(c) => Some(c),
            Declaration::Property(_) => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyDeclaration> {
        match self {
            Declaration::Property(p) => Some(p),
            Declaration::Class(_) => None,
        }
    }
}

impl From<ClassDeclaration> for Declaration {
    fn from(value: ClassDeclaration) -> Self {
        Declaration::Class(value)
    }
}

impl From<PropertyDeclaration> for Declaration {
    fn from(value: PropertyDeclaration) -> Self {
        Declaration::Property(value)
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String, DeclarationError> {
    if value.trim().is_empty() {
        return Err(DeclarationError::EmptyField { field });
    }
    Ok(value)
}
