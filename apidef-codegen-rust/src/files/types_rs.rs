//! The shared types file: the error result struct and every user type.

use apidef_codegen::{
    CodegenFile,
    builder::CodeBuilder,
    generation::FileCategory,
    paths::{AllocationError, PathTemplate},
    pipeline::Design,
    section::{Section, SectionRenderer, Template},
};
use apidef_expr::DataType;

use super::RustNames;
use crate::{
    shapes::{FieldData, ShapeCollector, StructData},
    type_mapper::{ERROR_RESULT, RustTypeMapper},
};

/// A user type that is not an object, rendered as `pub type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAlias {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypesData {
    pub structs: Vec<StructData>,
    pub aliases: Vec<TypeAlias>,
}

struct TypesTemplate;

impl Template for TypesTemplate {
    type Data = TypesData;

    fn name(&self) -> &'static str {
        "types"
    }

    fn render(&self, data: &TypesData, out: &mut CodeBuilder) {
        for (i, s) in data.structs.iter().enumerate() {
            if i > 0 {
                out.blank();
            }
            out.emit(&s.to_struct());
        }
        for alias in &data.aliases {
            out.blank();
            if let Some(doc) = &alias.doc {
                out.doc(doc);
            }
            out.line(&format!("pub type {} = {};", alias.name, alias.ty));
        }
    }
}

/// `src/types.rs`
pub struct TypesRs {
    api: String,
    data: TypesData,
}

impl TypesRs {
    pub fn new(design: &Design, mapper: &RustTypeMapper, names: RustNames<'_>) -> Self {
        let naming = names.naming();
        let mut shapes = ShapeCollector::new(mapper, naming);
        let mut aliases = Vec::new();

        for user_type in design.types() {
            let name = naming.type_name(&user_type.name);
            let ty = shapes.map(&name, &user_type.attribute);
            if !matches!(user_type.attribute.ty, DataType::Object(_)) {
                aliases.push(TypeAlias {
                    name,
                    ty,
                    doc: user_type.attribute.description.clone(),
                });
            }
        }

        let mut structs = vec![error_result()];
        structs.extend(shapes.into_structs());

        Self {
            api: design.name().to_string(),
            data: TypesData { structs, aliases },
        }
    }

    pub fn data(&self) -> &TypesData {
        &self.data
    }
}

fn error_result() -> StructData {
    let field = |name: &str, doc: &str| FieldData {
        name: name.to_string(),
        ty: "String".to_string(),
        doc: Some(doc.to_string()),
    };
    StructData {
        name: ERROR_RESULT.to_string(),
        doc: Some("Error returned by a service method.".to_string()),
        fields: vec![
            field("name", "Name of the error, as declared in the design."),
            field("message", "Human-readable description of the failure."),
        ],
    }
}

impl CodegenFile for TypesRs {
    fn name(&self) -> String {
        "types".to_string()
    }

    fn category(&self) -> FileCategory {
        FileCategory::Types
    }

    fn path_template(&self) -> Result<PathTemplate, AllocationError> {
        Ok(PathTemplate::new("src/types{n}.rs")?.bare_first())
    }

    fn sections(&self, renderer: &SectionRenderer) -> Vec<Section> {
        vec![
            renderer.header(
                &format!("Types shared by the services of the {} API.", self.api),
                Vec::new(),
            ),
            renderer.body(&TypesTemplate, &self.data),
        ]
    }
}
