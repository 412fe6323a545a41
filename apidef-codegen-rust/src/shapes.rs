//! Named structs for inline object types.
//!
//! Payloads, results, errors and user types may be inline objects, which
//! have no name in the design. Each one becomes a struct named after its
//! position (`DividePayload`, `CellarBottles`), so mapped types can refer to
//! it.

use apidef_codegen::{TypeMapper, naming::NamingConvention};
use apidef_expr::{AttributeExpr, DataType};

use crate::{
    ast::{Field, Struct},
    type_mapper::RustTypeMapper,
};

/// Derives carried by every generated data struct.
pub const DATA_DERIVES: &[&str] = &["Debug", "Clone", "PartialEq"];

/// A struct extracted from an inline object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructData {
    pub name: String,
    pub doc: Option<String>,
    pub fields: Vec<FieldData>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldData {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
}

impl StructData {
    pub fn to_struct(&self) -> Struct {
        DATA_DERIVES
            .iter()
            .fold(Struct::new(&self.name), |s, d| s.derive(*d))
            .doc(self.doc.as_deref())
            .fields(
                self.fields
                    .iter()
                    .map(|f| Field::new(&f.name, &f.ty).doc(f.doc.as_deref())),
            )
    }
}

/// Collects the structs needed to represent attribute types.
pub struct ShapeCollector<'a> {
    mapper: &'a RustTypeMapper,
    naming: &'a NamingConvention,
    structs: Vec<StructData>,
}

impl<'a> ShapeCollector<'a> {
    pub fn new(mapper: &'a RustTypeMapper, naming: &'a NamingConvention) -> Self {
        Self {
            mapper,
            naming,
            structs: Vec::new(),
        }
    }

    /// Map `attribute` to a Rust type, naming any inline object `name`, and
    /// collect the structs it needs.
    pub fn map(&mut self, name: &str, attribute: &AttributeExpr) -> String {
        self.collect(name, &attribute.ty, attribute.description.as_deref());
        self.mapper.map_type(&attribute.ty, name)
    }

    fn collect(&mut self, name: &str, ty: &DataType, doc: Option<&str>) {
        match ty {
            DataType::Object(members) => {
                let fields = members
                    .iter()
                    .map(|m| FieldData {
                        name: self.naming.field_name(&m.name),
                        ty: self
                            .mapper
                            .map_type(&m.attribute.ty, &self.member_type(name, &m.name)),
                        doc: m.attribute.description.clone(),
                    })
                    .collect();
                self.structs.push(StructData {
                    name: name.to_string(),
                    doc: doc.map(str::to_string),
                    fields,
                });
                for m in members {
                    let member_type = self.member_type(name, &m.name);
                    self.collect(&member_type, &m.attribute.ty, m.attribute.description.as_deref());
                }
            }
            DataType::Array(elem) => self.collect(name, elem, doc),
            DataType::Map(key, value) => {
                self.collect(name, key, doc);
                self.collect(name, value, doc);
            }
            DataType::Empty | DataType::Primitive(_) | DataType::Ref(_) | DataType::ErrorResult => {}
        }
    }

    fn member_type(&self, parent: &str, member: &str) -> String {
        format!("{}{}", parent, self.naming.type_name(member))
    }

    pub fn into_structs(self) -> Vec<StructData> {
        self.structs
    }
}
