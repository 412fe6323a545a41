//! Type descriptors and attribute subtrees.

use std::{fmt, str::FromStr};

use serde::Serialize;

/// Error names provided by the framework. Declaring one of these requires an
/// explicit override.
pub const RESERVED_ERROR_NAMES: &[&str] = &[
    "bad_request",
    "unauthorized",
    "forbidden",
    "not_found",
    "conflict",
    "internal",
    "unavailable",
    "timeout",
];

/// Primitive leaf types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Boolean,
    Int,
    Int32,
    Int64,
    UInt,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Bytes,
    Any,
}

impl Primitive {
    const ALL: [Primitive; 12] = [
        Primitive::Boolean,
        Primitive::Int,
        Primitive::Int32,
        Primitive::Int64,
        Primitive::UInt,
        Primitive::UInt32,
        Primitive::UInt64,
        Primitive::Float32,
        Primitive::Float64,
        Primitive::String,
        Primitive::Bytes,
        Primitive::Any,
    ];

    /// Design-language name of the primitive.
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Int => "int",
            Primitive::Int32 => "int32",
            Primitive::Int64 => "int64",
            Primitive::UInt => "uint",
            Primitive::UInt32 => "uint32",
            Primitive::UInt64 => "uint64",
            Primitive::Float32 => "float32",
            Primitive::Float64 => "float64",
            Primitive::String => "string",
            Primitive::Bytes => "bytes",
            Primitive::Any => "any",
        }
    }

    /// Look a primitive up by its design-language name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// A named member of an object type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub name: String,
    pub attribute: AttributeExpr,
}

/// A type descriptor.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum DataType {
    /// No type: an absent payload or result.
    #[default]
    Empty,
    Primitive(Primitive),
    Array(Box<DataType>),
    Map(Box<DataType>, Box<DataType>),
    /// An inline object with uniquely-named members (checked by validation).
    Object(Vec<Member>),
    /// A reference, by name, to a user type defined at the root.
    Ref(String),
    /// The built-in error result type.
    ErrorResult,
}

impl DataType {
    /// Shorthand for a reference to a named user type.
    pub fn named(name: impl Into<String>) -> Self {
        DataType::Ref(name.into())
    }

    /// Shorthand for an array of `elem`.
    pub fn array_of(elem: DataType) -> Self {
        DataType::Array(Box::new(elem))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, DataType::Empty)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, DataType::Object(_))
    }

    /// Object members, if this is an object.
    pub fn members(&self) -> &[Member] {
        match self {
            DataType::Object(members) => members,
            _ => &[],
        }
    }

    /// Every user type name referenced by this descriptor, recursively, in
    /// declaration order.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            DataType::Ref(name) => out.push(name),
            DataType::Array(elem) => elem.collect_references(out),
            DataType::Map(key, value) => {
                key.collect_references(out);
                value.collect_references(out);
            }
            DataType::Object(members) => {
                for member in members {
                    member.attribute.ty.collect_references(out);
                }
            }
            DataType::Empty | DataType::Primitive(_) | DataType::ErrorResult => {}
        }
    }
}

impl From<Primitive> for DataType {
    fn from(p: Primitive) -> Self {
        DataType::Primitive(p)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Empty => write!(f, "empty"),
            DataType::Primitive(p) => write!(f, "{}", p.name()),
            DataType::Array(elem) => write!(f, "[]{}", elem),
            DataType::Map(key, value) => write!(f, "map[{}]{}", key, value),
            DataType::Object(_) => write!(f, "object"),
            DataType::Ref(name) => write!(f, "{}", name),
            DataType::ErrorResult => write!(f, "error_result"),
        }
    }
}

/// Error returned when a type expression cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTypeError(pub String);

impl fmt::Display for ParseTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid type expression '{}'", self.0)
    }
}

impl std::error::Error for ParseTypeError {}

/// Parses the compact type syntax used in design files: primitive names,
/// `[]T`, `map[K]V`, `error_result`, `empty`, or a user type name.
impl FromStr for DataType {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(elem) = s.strip_prefix("[]") {
            return Ok(DataType::array_of(elem.parse()?));
        }
        if let Some(rest) = s.strip_prefix("map[") {
            let close = rest.find(']').ok_or_else(|| ParseTypeError(s.to_string()))?;
            let key = rest[..close].parse()?;
            let value = rest[close + 1..].parse()?;
            return Ok(DataType::Map(Box::new(key), Box::new(value)));
        }
        match s {
            "empty" => return Ok(DataType::Empty),
            "error_result" => return Ok(DataType::ErrorResult),
            _ => {}
        }
        if let Some(p) = Primitive::from_name(s) {
            return Ok(DataType::Primitive(p));
        }
        let valid = s.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
            && s.chars().all(|c| c.is_alphanumeric() || c == '_');
        if valid {
            Ok(DataType::Ref(s.to_string()))
        } else {
            Err(ParseTypeError(s.to_string()))
        }
    }
}

/// An attribute: a type descriptor plus its documentation.
///
/// Payloads, results, error types, user types and object members are all
/// attributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AttributeExpr {
    pub ty: DataType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AttributeExpr {
    pub fn new(ty: DataType) -> Self {
        Self {
            ty,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Find an object member by name.
    pub fn member(&self, name: &str) -> Option<&AttributeExpr> {
        self.ty
            .members()
            .iter()
            .find(|m| m.name == name)
            .map(|m| &m.attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitives() {
        assert_eq!("int".parse(), Ok(DataType::Primitive(Primitive::Int)));
        assert_eq!(
            "float64".parse(),
            Ok(DataType::Primitive(Primitive::Float64))
        );
        assert_eq!("error_result".parse(), Ok(DataType::ErrorResult));
    }

    #[test]
    fn test_parse_composites() {
        assert_eq!(
            "[]string".parse(),
            Ok(DataType::array_of(Primitive::String.into()))
        );
        assert_eq!(
            "map[string][]Bottle".parse(),
            Ok(DataType::Map(
                Box::new(Primitive::String.into()),
                Box::new(DataType::array_of(DataType::named("Bottle")))
            ))
        );
    }

    #[test]
    fn test_parse_reference_and_invalid() {
        assert_eq!("DivideRequest".parse(), Ok(DataType::named("DivideRequest")));
        assert!("map[string".parse::<DataType>().is_err());
        assert!("not a type".parse::<DataType>().is_err());
    }

    #[test]
    fn test_display_round_trips_syntax() {
        let ty: DataType = "map[string][]Bottle".parse().unwrap();
        assert_eq!(ty.to_string(), "map[string][]Bottle");
    }

    #[test]
    fn test_references_are_collected_recursively() {
        let ty = DataType::Object(vec![
            Member {
                name: "owner".into(),
                attribute: AttributeExpr::new(DataType::named("Account")),
            },
            Member {
                name: "bottles".into(),
                attribute: AttributeExpr::new(DataType::array_of(DataType::named("Bottle"))),
            },
        ]);
        assert_eq!(ty.references(), vec!["Account", "Bottle"]);
    }
}
