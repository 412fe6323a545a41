//! Per-service error file: one enum per method listing every error the
//! method can return.

use apidef_codegen::{
    CodegenFile,
    builder::CodeBuilder,
    generation::{FileCategory, ImportSpec},
    paths::{AllocationError, PathTemplate},
    section::{Section, SectionRenderer, Template},
};
use apidef_expr::{ErrorExpr, ServiceExpr};

use super::{RustNames, quoted, type_imports};
use crate::{
    ast::{Enum, Variant},
    shapes::{DATA_DERIVES, ShapeCollector, StructData},
    type_mapper::RustTypeMapper,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorVariantData {
    pub variant: String,
    /// Error name as declared in the design, used for `Display`.
    pub name: String,
    pub data: Option<String>,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEnumData {
    pub name: String,
    pub method: String,
    pub variants: Vec<ErrorVariantData>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorsData {
    pub structs: Vec<StructData>,
    pub enums: Vec<ErrorEnumData>,
}

struct ErrorsTemplate;

impl Template for ErrorsTemplate {
    type Data = ErrorsData;

    fn name(&self) -> &'static str {
        "errors"
    }

    fn render(&self, data: &ErrorsData, out: &mut CodeBuilder) {
        for s in &data.structs {
            out.emit(&s.to_struct());
            out.blank();
        }
        for (i, e) in data.enums.iter().enumerate() {
            if i > 0 {
                out.blank();
            }
            render_enum(e, out);
        }
    }
}

fn render_enum(data: &ErrorEnumData, out: &mut CodeBuilder) {
    let variants: Vec<Variant> = data
        .variants
        .iter()
        .map(|v| {
            let variant = Variant::new(&v.variant).doc(v.doc.as_deref());
            match &v.data {
                Some(ty) => variant.tuple(ty),
                None => variant,
            }
        })
        .collect();

    let item = DATA_DERIVES
        .iter()
        .fold(Enum::new(&data.name), |e, d| e.derive(*d))
        .doc(format!("Errors returned by `{}`.", data.method))
        .variants(variants.iter().cloned());
    out.emit(&item);
    out.blank();

    out.braced(&format!("impl std::fmt::Display for {} {{", data.name), |out| {
        out.braced(
            "fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {",
            |out| {
                if variants.is_empty() {
                    out.line("match *self {}");
                    return;
                }
                out.braced("match self {", |out| {
                    for (variant, v) in variants.iter().zip(&data.variants) {
                        out.line(&format!(
                            "{} => f.write_str({}),",
                            variant.pattern(),
                            quoted(&v.name)
                        ));
                    }
                });
            },
        );
    });
    out.blank();
    out.line(&format!("impl std::error::Error for {} {{}}", data.name));
}

/// `src/errors/<service>.rs`
pub struct ErrorsRs {
    service: String,
    module: String,
    imports: Vec<ImportSpec>,
    data: ErrorsData,
}

impl ErrorsRs {
    /// Build the error enums of `service`. `module` is the module name
    /// allocated for the service.
    pub fn new(
        service: &ServiceExpr,
        module: &str,
        mapper: &RustTypeMapper,
        names: RustNames<'_>,
    ) -> Self {
        let mut shapes = ShapeCollector::new(mapper, names.naming());
        let mut imports = Vec::new();
        let mut variant = |method: Option<&str>, err: &ErrorExpr| {
            imports.extend(type_imports(&err.attribute.ty, names.naming()));
            let data = (!err.attribute.ty.is_empty())
                .then(|| shapes.map(&names.error_details(method, &err.name), &err.attribute));
            ErrorVariantData {
                variant: names.naming().type_name(&err.name),
                name: err.name.clone(),
                data,
                doc: err.description().map(str::to_string),
            }
        };

        // Service errors are shared by every method; extract them once.
        let shared: Vec<ErrorVariantData> =
            service.errors.iter().map(|e| variant(None, e)).collect();

        let enums = service
            .methods
            .iter()
            .map(|m| {
                let mut variants = shared.clone();
                variants.extend(m.errors.iter().map(|e| variant(Some(&m.name), e)));
                ErrorEnumData {
                    name: names.error_enum(&m.name),
                    method: m.name.clone(),
                    variants,
                }
            })
            .collect();

        Self {
            service: service.name.clone(),
            module: module.to_string(),
            imports,
            data: ErrorsData {
                structs: shapes.into_structs(),
                enums,
            },
        }
    }

    pub fn data(&self) -> &ErrorsData {
        &self.data
    }
}

impl CodegenFile for ErrorsRs {
    fn name(&self) -> String {
        format!("errors \"{}\"", self.service)
    }

    fn category(&self) -> FileCategory {
        FileCategory::Errors
    }

    fn path_template(&self) -> Result<PathTemplate, AllocationError> {
        Ok(PathTemplate::new(format!("src/errors/{}{{n}}.rs", self.module))?.bare_first())
    }

    fn sections(&self, renderer: &SectionRenderer) -> Vec<Section> {
        vec![
            renderer.header(
                &format!("Errors of the {} service.", self.service),
                self.imports.clone(),
            ),
            renderer.body(&ErrorsTemplate, &self.data),
        ]
    }
}

#[cfg(test)]
mod tests {
    use apidef_codegen::naming::RUST_NAMING;
    use apidef_expr::{AttributeExpr, DataType, MethodExpr, Primitive};

    use super::*;

    fn generate(service: &ServiceExpr) -> ErrorsRs {
        ErrorsRs::new(
            service,
            "divider",
            &RustTypeMapper::default(),
            RustNames::new(&RUST_NAMING),
        )
    }

    #[test]
    fn test_effective_errors_per_method() {
        let mut svc = ServiceExpr::new("divider");
        svc.errors.push(ErrorExpr::new("invalid_arguments"));
        let mut divide = MethodExpr::new("divide");
        divide.errors.push(ErrorExpr::new("div_by_zero"));
        svc.methods.push(divide);
        svc.methods.push(MethodExpr::new("modulo"));

        let file = generate(&svc);
        let enums = &file.data().enums;

        let divide: Vec<_> = enums[0].variants.iter().map(|v| v.variant.as_str()).collect();
        assert_eq!(divide, vec!["InvalidArguments", "DivByZero"]);
        let modulo: Vec<_> = enums[1].variants.iter().map(|v| v.variant.as_str()).collect();
        assert_eq!(modulo, vec!["InvalidArguments"]);
        assert_eq!(enums[0].variants[0].data.as_deref(), Some("ErrorResult"));
        assert_eq!(
            file.imports,
            vec![
                ImportSpec::symbol("crate::types", "ErrorResult"),
                ImportSpec::symbol("crate::types", "ErrorResult"),
            ]
        );
    }

    #[test]
    fn test_inline_error_details() {
        let mut svc = ServiceExpr::new("divider");
        let mut divide = MethodExpr::new("divide");
        let mut overflow = ErrorExpr::new("overflow");
        overflow.attribute = AttributeExpr::new(DataType::Object(vec![apidef_expr::Member {
            name: "limit".into(),
            attribute: AttributeExpr::new(Primitive::Int64.into()),
        }]));
        divide.errors.push(overflow);
        let mut unit = ErrorExpr::new("cancelled");
        unit.attribute = AttributeExpr::new(DataType::Empty);
        divide.errors.push(unit);
        svc.methods.push(divide);

        let file = generate(&svc);

        assert_eq!(file.data().structs[0].name, "DivideOverflowDetails");
        let variants = &file.data().enums[0].variants;
        assert_eq!(variants[0].data.as_deref(), Some("DivideOverflowDetails"));
        assert_eq!(variants[1].data, None);
    }

    #[test]
    fn test_method_without_errors_renders_empty_match() {
        let mut svc = ServiceExpr::new("divider");
        svc.methods.push(MethodExpr::new("modulo"));

        let mut out = CodeBuilder::rust();
        ErrorsTemplate.render(generate(&svc).data(), &mut out);
        let text = out.build();

        assert!(text.contains("pub enum ModuloError {}"));
        assert!(text.contains("match *self {}"));
    }
}
