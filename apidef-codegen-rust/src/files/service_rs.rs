//! Per-service trait file, with the payload and result structs its methods
//! take and return.

use apidef_codegen::{
    CodegenFile,
    builder::CodeBuilder,
    generation::{FileCategory, ImportSpec},
    paths::{AllocationError, PathTemplate},
    section::{Section, SectionRenderer, Template},
};
use apidef_expr::ServiceExpr;

use super::{RustNames, type_imports};
use crate::{
    ast::{Trait, TraitMethod},
    shapes::{ShapeCollector, StructData},
    type_mapper::RustTypeMapper,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMethodData {
    pub name: String,
    pub doc: Option<String>,
    pub payload: Option<String>,
    pub result: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceData {
    pub trait_name: String,
    pub doc: Option<String>,
    pub structs: Vec<StructData>,
    pub methods: Vec<ServiceMethodData>,
}

struct ServiceTemplate;

impl Template for ServiceTemplate {
    type Data = ServiceData;

    fn name(&self) -> &'static str {
        "service"
    }

    fn render(&self, data: &ServiceData, out: &mut CodeBuilder) {
        for s in &data.structs {
            out.emit(&s.to_struct());
            out.blank();
        }

        let item = data.methods.iter().fold(
            Trait::new(&data.trait_name).doc(data.doc.as_deref()),
            |t, m| {
                let method = TraitMethod::new(&m.name).doc(m.doc.as_deref());
                let method = match &m.payload {
                    Some(payload) => method.param("payload", payload),
                    None => method,
                };
                t.method(method.returns(format!("Result<{}, {}>", m.result, m.error)))
            },
        );
        out.emit(&item);
    }
}

/// `src/services/<service>.rs`
pub struct ServiceRs {
    service: String,
    module: String,
    imports: Vec<ImportSpec>,
    data: ServiceData,
}

impl ServiceRs {
    pub fn new(
        service: &ServiceExpr,
        module: &str,
        mapper: &RustTypeMapper,
        names: RustNames<'_>,
    ) -> Self {
        let naming = names.naming();
        let mut shapes = ShapeCollector::new(mapper, naming);
        let mut imports = Vec::new();
        let errors_module = format!("crate::errors::{}", module);

        let methods = service
            .methods
            .iter()
            .map(|m| {
                let payload = m.payload().filter(|_| m.has_payload()).map(|p| {
                    imports.extend(type_imports(&p.ty, naming));
                    shapes.map(&names.payload(&m.name), p)
                });
                let result = match m.result().filter(|_| m.has_result()) {
                    Some(r) => {
                        imports.extend(type_imports(&r.ty, naming));
                        shapes.map(&names.result(&m.name), r)
                    }
                    None => "()".to_string(),
                };
                let error = names.error_enum(&m.name);
                imports.push(ImportSpec::symbol(errors_module.as_str(), error.as_str()));
                ServiceMethodData {
                    name: naming.field_name(&m.name),
                    doc: m.description.clone(),
                    payload,
                    result,
                    error,
                }
            })
            .collect();

        Self {
            service: service.name.clone(),
            module: module.to_string(),
            imports,
            data: ServiceData {
                trait_name: names.service_trait(&service.name),
                doc: service.description.clone(),
                structs: shapes.into_structs(),
                methods,
            },
        }
    }

    pub fn data(&self) -> &ServiceData {
        &self.data
    }
}

impl CodegenFile for ServiceRs {
    fn name(&self) -> String {
        format!("service \"{}\"", self.service)
    }

    fn category(&self) -> FileCategory {
        FileCategory::Service
    }

    fn path_template(&self) -> Result<PathTemplate, AllocationError> {
        Ok(PathTemplate::new(format!("src/services/{}{{n}}.rs", self.module))?.bare_first())
    }

    fn sections(&self, renderer: &SectionRenderer) -> Vec<Section> {
        vec![
            renderer.header(
                &format!("The {} service.", self.service),
                self.imports.clone(),
            ),
            renderer.body(&ServiceTemplate, &self.data),
        ]
    }
}
