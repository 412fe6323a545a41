//! Rust type mapper implementation.

use apidef_codegen::{TypeMapper, naming::NamingConvention};
use apidef_expr::{DataType, Primitive};

/// Name of the struct generated for the built-in error result type.
pub const ERROR_RESULT: &str = "ErrorResult";

/// Maps design types to Rust type syntax.
#[derive(Debug, Clone, Copy)]
pub struct RustTypeMapper {
    naming: NamingConvention,
}

impl RustTypeMapper {
    pub fn new(naming: NamingConvention) -> Self {
        Self { naming }
    }
}

impl Default for RustTypeMapper {
    fn default() -> Self {
        Self::new(NamingConvention::default())
    }
}

impl TypeMapper for RustTypeMapper {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn map_primitive(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::Boolean => "bool",
            Primitive::Int | Primitive::Int64 => "i64",
            Primitive::Int32 => "i32",
            Primitive::UInt | Primitive::UInt64 => "u64",
            Primitive::UInt32 => "u32",
            Primitive::Float32 => "f32",
            Primitive::Float64 => "f64",
            Primitive::String => "String",
            Primitive::Bytes => "Vec<u8>",
            Primitive::Any => "serde_json::Value",
        }
    }

    fn map_type(&self, ty: &DataType, inline_name: &str) -> String {
        match ty {
            DataType::Empty => "()".to_string(),
            DataType::Primitive(p) => self.map_primitive(*p).to_string(),
            DataType::Array(elem) => format!("Vec<{}>", self.map_type(elem, inline_name)),
            DataType::Map(key, value) => format!(
                "std::collections::BTreeMap<{}, {}>",
                self.map_type(key, inline_name),
                self.map_type(value, inline_name)
            ),
            DataType::Object(_) => inline_name.to_string(),
            DataType::Ref(name) => self.naming.type_name(name),
            DataType::ErrorResult => ERROR_RESULT.to_string(),
        }
    }
}

/// True if `ty` mentions the error result type anywhere.
pub fn uses_error_result(ty: &DataType) -> bool {
    match ty {
        DataType::ErrorResult => true,
        DataType::Array(elem) => uses_error_result(elem),
        DataType::Map(key, value) => uses_error_result(key) || uses_error_result(value),
        DataType::Object(members) => members.iter().any(|m| uses_error_result(&m.attribute.ty)),
        DataType::Empty | DataType::Primitive(_) | DataType::Ref(_) => false,
    }
}
