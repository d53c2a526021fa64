//! Attribute value type → literal datatype.
//!
//! The recognised primitive kinds form a closed set. A value type outside it
//! means the schema has outgrown the generator, which is reported as
//! [`MappingError::UnknownPrimitiveType`] rather than silently mapped.

use crate::error::MappingError;
use crate::vocab::xsd;

/// Primitive value kinds the generator knows how to type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// `java.lang.String`.
    String,
    /// `java.lang.Boolean` or `boolean`.
    Boolean,
    /// `java.lang.Integer` or `int`.
    Integer,
    /// `java.lang.Double` or `double`.
    Double,
    /// Large text stored out of line (`ClobAccess`).
    Text,
}

impl PrimitiveKind {
    /// Parses a raw value type name. Returns `None` if it is not recognised.
    #[must_use]
    pub fn parse(value_type: &str) -> Option<Self> {
        match value_type {
            "java.lang.String" => Some(Self::String),
            "java.lang.Boolean" | "boolean" => Some(Self::Boolean),
            "java.lang.Integer" | "int" => Some(Self::Integer),
            "java.lang.Double" | "double" => Some(Self::Double),
            "org.intermine.objectstore.query.ClobAccess" => Some(Self::Text),
            _ => None,
        }
    }

    /// Resolves the kind of attribute `class.field`.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::UnknownPrimitiveType`] for unrecognised types.
    pub fn resolve(class: &str, field: &str, value_type: &str) -> Result<Self, MappingError> {
        Self::parse(value_type).ok_or_else(|| MappingError::UnknownPrimitiveType {
            class: class.to_owned(),
            field: field.to_owned(),
            value_type: value_type.to_owned(),
        })
    }

    /// Literal datatype IRI for values of this kind.
    #[must_use]
    pub fn datatype(self) -> &'static str {
        match self {
            Self::String | Self::Text => xsd::STRING,
            Self::Boolean => xsd::BOOLEAN,
            Self::Integer => xsd::INTEGER,
            Self::Double => xsd::DECIMAL,
        }
    }
}
