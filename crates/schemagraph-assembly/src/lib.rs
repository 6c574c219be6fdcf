//! Schemagraph assembly
//!
//! Folds an ordered sequence of class and property declarations into one
//! [`SchemaUnit`]: a validated, deduplicated set of declarations paired with
//! the conjunction tree used to submit them in a single transaction.
//!
//! ```text
//!   declarations ──► partition ──► dedup ──► resolve ──► fold ──► SchemaUnit
//!                   (first-seen)  (merge or  (owners,    (left to
//!                                  conflict)  parents)    right)
//! ```
//!
//! Assembly is all-or-nothing: any validation failure returns an
//! [`AssemblyError`] and no unit.

pub mod assembler;
pub mod config;
pub mod error;
pub mod tree;
pub mod unit;

pub use assembler::{assemble, AssemblyReport, Assembler};
pub use config::AssemblyConfig;
pub use error::AssemblyError;
pub use tree::SchemaTree;
pub use unit::SchemaUnit;
