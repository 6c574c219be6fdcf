//! Schemagraph declarations
//!
//! This crate defines the leaf inputs of schema assembly: immutable class and
//! property declarations, the closed value-type vocabulary they draw from, and
//! the declaration factory that normalizes a compact specification tuple into
//! a [`PropertyDeclaration`].
//!
//! Declarations are plain values. They are never mutated after construction;
//! every constructor (including JSON deserialization) goes through the same
//! validating factory, so a declaration that exists is well-formed.

pub mod declaration;
pub mod digest;
pub mod tag;
pub mod value_type;

pub use declaration::{
    make_class, make_document, make_property, ClassDeclaration, ClassKind, ClassSpec,
    Declaration, DeclarationError, PropertyDeclaration, PropertySpec, NO_TAGS,
};
pub use tag::{Tag, KNOWN_AUTHORITY_DOMAINS};
pub use value_type::ValueType;
