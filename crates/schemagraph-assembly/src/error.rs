use thiserror::Error;

/// Reasons an assembly attempt is rejected. Every variant aborts the whole
/// attempt; no partial unit is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("conflicting declarations for `{identifier}`")]
    ConflictingDeclaration { identifier: String },

    #[error("property `{identifier}` is owned by undeclared class `{owning_class}`")]
    UnknownClass {
        identifier: String,
        owning_class: String,
    },

    #[error("class `{identifier}` has undeclared parent `{parent}`")]
    UnknownParent { identifier: String, parent: String },

    #[error("class `{identifier}` is its own ancestor")]
    InheritanceCycle { identifier: String },
}
