//! Design files.
//!
//! A design file is a TOML rendition of the builder DSL. Loading parses it
//! into the `*Spec` tables below; [`replay`] then makes the matching
//! builder calls on an evaluator, so a file design goes through exactly the
//! same evaluation and validation as one written in Rust.
//!
//! ```toml
//! [api]
//! name = "calc"
//!
//! [[services]]
//! name = "divider"
//!
//! [[services.methods]]
//! name = "divide"
//! result = { type = "float64" }
//! payload = { attributes = [{ name = "a", type = "int" }, { name = "b", type = "int" }] }
//!
//! [[services.methods.errors]]
//! name = "div_by_zero"
//! ```

mod error;
mod replay;

use std::{path::Path, str::FromStr};

use apidef_expr::{DataType, HttpMethod, ParseTypeError};
pub use error::{DesignError, Result};
pub use replay::replay;
use serde::Deserialize;

/// A parsed design file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignFile {
    pub api: Option<ApiSpec>,
    #[serde(default)]
    pub types: Vec<TypeSpec>,
    #[serde(default)]
    pub services: Vec<ServiceSpec>,
    #[serde(default)]
    pub codegen: CodegenSpec,
}

impl DesignFile {
    /// Read and parse the design file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|e| DesignError::io(path, e))?;
        Self::parse(&src, &path.display().to_string())
    }

    /// Parse design file text; `filename` is used in error reports.
    pub fn parse(src: &str, filename: &str) -> Result<Self> {
        toml::from_str(src).map_err(|e| DesignError::parse(src, filename, e))
    }
}

impl FromStr for DesignFile {
    type Err = Box<DesignError>;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, "design.toml")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSpec {
    pub name: String,
    pub title: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub http: ApiHttpSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiHttpSpec {
    pub path: Option<String>,
    #[serde(default)]
    pub schemes: Vec<String>,
    #[serde(default)]
    pub consumes: Vec<String>,
    #[serde(default)]
    pub produces: Vec<String>,
    #[serde(default)]
    pub responses: Vec<NamedResponseSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamedResponseSpec {
    pub name: String,
    pub status: u16,
}

/// A named object type.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeSpec {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: Vec<MemberSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSpec {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub errors: Vec<ErrorSpec>,
    pub http: Option<ServiceHttpSpec>,
    #[serde(default)]
    pub methods: Vec<MethodSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceHttpSpec {
    pub path: Option<String>,
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodSpec {
    pub name: String,
    pub description: Option<String>,
    pub payload: Option<AttributeSpec>,
    pub result: Option<AttributeSpec>,
    #[serde(default)]
    pub errors: Vec<ErrorSpec>,
    pub http: Option<MethodHttpSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodHttpSpec {
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
    /// Status codes or names of API-wide or built-in responses.
    #[serde(default)]
    pub responses: Vec<ResponseSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteSpec {
    pub method: MethodName,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResponseSpec {
    Status(u16),
    Named(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<TypeName>,
    pub description: Option<String>,
    /// Allow reusing a built-in error name.
    #[serde(default, rename = "override")]
    pub override_builtin: bool,
    #[serde(default)]
    pub attributes: Vec<MemberSpec>,
}

/// A payload or result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeSpec {
    #[serde(rename = "type")]
    pub ty: Option<TypeName>,
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: Vec<MemberSpec>,
}

/// An object member.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<TypeName>,
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: Vec<MemberSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodegenSpec {
    /// Output paths the generator must not use.
    #[serde(default)]
    pub reserved: Vec<String>,
    /// Replaces the generated-code comment at the top of every file.
    pub header: Option<String>,
}

/// A type expression in the compact syntax (`int`, `[]string`,
/// `map[string]Order`, `Order`), parsed while the file is read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct TypeName(pub DataType);

impl TryFrom<String> for TypeName {
    type Error = ParseTypeError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse().map(TypeName)
    }
}

/// An HTTP method name, matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct MethodName(pub HttpMethod);

impl TryFrom<String> for MethodName {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        HttpMethod::from_name(&value)
            .map(MethodName)
            .ok_or_else(|| format!("unknown HTTP method '{}'", value))
    }
}
