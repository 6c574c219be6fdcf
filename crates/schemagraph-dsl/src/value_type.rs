//! The closed value-type vocabulary.
//!
//! Every property declares exactly one value type. The set is fixed: names
//! outside it are rejected by the factory with
//! [`DeclarationError::InvalidValueType`](crate::DeclarationError::InvalidValueType).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::declaration::DeclarationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValueType {
    /// Binary presence/absence of a feature (coded Present / Absent / Unknown).
    EpistemicState,
    /// Free text or a reference to a political entity.
    PoliticalAuthority,
    /// The consequences recorded for a conflict.
    ConflictConsequences,
    String,
    Boolean,
    Integer,
    Decimal,
    DateTime,
}

impl ValueType {
    pub const ALL: [ValueType; 8] = [
        ValueType::EpistemicState,
        ValueType::PoliticalAuthority,
        ValueType::ConflictConsequences,
        ValueType::String,
        ValueType::Boolean,
        ValueType::Integer,
        ValueType::Decimal,
        ValueType::DateTime,
    ];

    /// Canonical spelling, as rendered into the schema document.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::EpistemicState => "EpistemicState",
            ValueType::PoliticalAuthority => "PoliticalAuthority",
            ValueType::ConflictConsequences => "ConflictConsequences",
            ValueType::String => "xsd:string",
            ValueType::Boolean => "xsd:boolean",
            ValueType::Integer => "xsd:integer",
            ValueType::Decimal => "xsd:decimal",
            ValueType::DateTime => "xsd:dateTime",
        }
    }

    /// `true` for the `xsd:` datatypes; these are rendered without the schema
    /// namespace prefix.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            ValueType::String
                | ValueType::Boolean
                | ValueType::Integer
                | ValueType::Decimal
                | ValueType::DateTime
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = DeclarationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s {
            "EpistemicState" => ValueType::EpistemicState,
            "PoliticalAuthority" => ValueType::PoliticalAuthority,
            "ConflictConsequences" => ValueType::ConflictConsequences,
            "xsd:string" | "string" => ValueType::String,
            "xsd:boolean" | "boolean" => ValueType::Boolean,
            "xsd:integer" | "integer" => ValueType::Integer,
            "xsd:decimal" | "decimal" => ValueType::Decimal,
            "xsd:dateTime" | "dateTime" => ValueType::DateTime,
            other => {
                return Err(DeclarationError::InvalidValueType {
                    value: other.to_string(),
                })
            }
        };
        Ok(ty)
    }
}

impl TryFrom<String> for ValueType {
    type Error = DeclarationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ValueType> for String {
    fn from(value: ValueType) -> Self {
        value.as_str().to_string()
    }
}
