//! Per-service endpoints file: one request variant per method, carrying the
//! payload when the method has one, plus the method's HTTP route and a
//! `call` that dispatches the request to the service trait.

use apidef_codegen::{
    CodegenFile, TypeMapper,
    builder::CodeBuilder,
    generation::{FileCategory, ImportSpec},
    paths::{AllocationError, PathTemplate},
    section::{Section, SectionRenderer, Template},
};
use apidef_expr::{DataType, HttpRoot, ServiceExpr};

use super::{RustNames, quoted, type_imports};
use crate::{
    ast::{Enum, Variant},
    type_mapper::RustTypeMapper,
};

/// One method of the service, as seen by the endpoints enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointData {
    /// Method name as declared in the design.
    pub method: String,
    pub variant: String,
    /// Trait method name.
    pub function: String,
    /// Payload type; `None` when the method takes no payload.
    pub payload: Option<String>,
    pub result: String,
    pub error: String,
    pub doc: Option<String>,
    /// HTTP verb and full path of the first route.
    pub route: Option<(String, String)>,
    /// Status of the first response.
    pub status: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointsData {
    pub enum_name: String,
    pub response_enum: String,
    pub trait_name: String,
    pub service: String,
    pub endpoints: Vec<EndpointData>,
}

struct EndpointsTemplate;

impl Template for EndpointsTemplate {
    type Data = EndpointsData;

    fn name(&self) -> &'static str {
        "endpoints"
    }

    fn render(&self, data: &EndpointsData, out: &mut CodeBuilder) {
        let variants: Vec<Variant> = data
            .endpoints
            .iter()
            .map(|e| {
                let variant = Variant::new(&e.variant).doc(e.doc.as_deref());
                match &e.payload {
                    Some(payload) => variant.tuple(payload),
                    None => variant,
                }
            })
            .collect();

        out.emit(
            &Enum::new(&data.enum_name)
                .doc(format!("A request to one method of the {} service.", data.service))
                .derive("Debug")
                .derive("Clone")
                .derive("PartialEq")
                .variants(variants.iter().cloned()),
        );
        out.blank();

        if !variants.is_empty() {
            let outcomes = data
                .endpoints
                .iter()
                .map(|e| Variant::new(&e.variant).tuple(format!("Result<{}, {}>", e.result, e.error)));
            out.emit(
                &Enum::new(&data.response_enum)
                    .doc(format!("Outcome of a call to one method of the {} service.", data.service))
                    .derive("Debug")
                    .derive("Clone")
                    .derive("PartialEq")
                    .variants(outcomes),
            );
            out.blank();
        }

        let methods = data
            .endpoints
            .iter()
            .map(|e| quoted(&e.method))
            .collect::<Vec<_>>()
            .join(", ");

        out.braced(&format!("impl {} {{", data.enum_name), |out| {
            out.doc("Method names, in declaration order.");
            out.line(&format!(
                "pub const METHODS: &'static [&'static str] = &[{}];",
                methods
            ));

            if variants.is_empty() {
                return;
            }

            out.blank();
            out.doc("Name of the method this request is for.");
            match_arms(out, "pub fn method(&self) -> &'static str {", &variants, |i| {
                quoted(&data.endpoints[i].method)
            });

            out.blank();
            out.doc("HTTP verb and path of the method's route, if it has one.");
            match_arms(
                out,
                "pub fn route(&self) -> Option<(&'static str, &'static str)> {",
                &variants,
                |i| match &data.endpoints[i].route {
                    Some((verb, path)) => format!("Some(({}, {}))", quoted(verb), quoted(path)),
                    None => "None".to_string(),
                },
            );

            out.blank();
            out.doc("Status code of a successful response.");
            match_arms(out, "pub fn status(&self) -> u16 {", &variants, |i| {
                data.endpoints[i].status.to_string()
            });

            out.blank();
            out.doc("Call the service method this request is for.");
            let signature = format!(
                "pub fn call<S: {} + ?Sized>(self, service: &S) -> {} {{",
                data.trait_name, data.response_enum
            );
            out.braced(&signature, |out| {
                out.braced("match self {", |out| {
                    for e in &data.endpoints {
                        let (pattern, args) = match e.payload {
                            Some(_) => (format!("Self::{}(payload)", e.variant), "payload"),
                            None => (format!("Self::{}", e.variant), ""),
                        };
                        out.line(&format!(
                            "{} => {}::{}(service.{}({})),",
                            pattern, data.response_enum, e.variant, e.function, args
                        ));
                    }
                });
            });
        });
    }
}

fn match_arms(
    out: &mut CodeBuilder,
    signature: &str,
    variants: &[Variant],
    value: impl Fn(usize) -> String,
) {
    out.braced(signature, |out| {
        out.braced("match self {", |out| {
            for (i, variant) in variants.iter().enumerate() {
                out.line(&format!("{} => {},", variant.pattern(), value(i)));
            }
        });
    });
}

/// `src/endpoints/<service>.rs`
pub struct EndpointsRs {
    service: String,
    module: String,
    imports: Vec<ImportSpec>,
    data: EndpointsData,
}

impl EndpointsRs {
    /// Build the endpoints of `service`. Routes and statuses come from the
    /// derived HTTP projection in `http`.
    pub fn new(
        service: &ServiceExpr,
        http: &HttpRoot,
        module: &str,
        mapper: &RustTypeMapper,
        names: RustNames<'_>,
    ) -> Self {
        let naming = names.naming();
        let resource = http.resource(&service.name);
        let services_module = format!("crate::services::{}", module);
        let errors_module = format!("crate::errors::{}", module);
        let trait_name = names.service_trait(&service.name);
        let mut imports = Vec::new();
        if !service.methods.is_empty() {
            imports.push(ImportSpec::symbol(services_module.as_str(), trait_name.as_str()));
        }

        let endpoints = service
            .methods
            .iter()
            .map(|m| {
                let payload = m.payload().filter(|_| m.has_payload()).map(|p| {
                    let inline = names.payload(&m.name);
                    imports.extend(type_imports(&p.ty, naming));
                    if contains_object(&p.ty) {
                        imports.push(ImportSpec::symbol(services_module.as_str(), inline.as_str()));
                    }
                    mapper.map_type(&p.ty, &inline)
                });
                let result = match m.result().filter(|_| m.has_result()) {
                    Some(r) => {
                        let inline = names.result(&m.name);
                        imports.extend(type_imports(&r.ty, naming));
                        if contains_object(&r.ty) {
                            imports.push(ImportSpec::symbol(services_module.as_str(), inline.as_str()));
                        }
                        mapper.map_type(&r.ty, &inline)
                    }
                    None => "()".to_string(),
                };
                let error = names.error_enum(&m.name);
                imports.push(ImportSpec::symbol(errors_module.as_str(), error.as_str()));

                let action = resource.and_then(|r| r.action(&m.name));
                let route = action.and_then(|a| a.routes.first()).map(|route| {
                    let path = [
                        http.path.as_deref(),
                        resource.and_then(|r| r.path.as_deref()),
                        Some(route.path.as_str()),
                    ]
                    .into_iter()
                    .flatten()
                    .collect::<String>();
                    (route.method.as_str().to_string(), path)
                });
                let status = action
                    .and_then(|a| a.responses.first())
                    .map(|r| r.status)
                    .unwrap_or(200);

                EndpointData {
                    method: m.name.clone(),
                    variant: naming.type_name(&m.name),
                    function: naming.field_name(&m.name),
                    payload,
                    result,
                    error,
                    doc: m.description.clone(),
                    route,
                    status,
                }
            })
            .collect();

        Self {
            service: service.name.clone(),
            module: module.to_string(),
            imports,
            data: EndpointsData {
                enum_name: names.endpoint_enum(&service.name),
                response_enum: names.response_enum(&service.name),
                trait_name,
                service: service.name.clone(),
                endpoints,
            },
        }
    }

    pub fn data(&self) -> &EndpointsData {
        &self.data
    }
}

/// True if mapping `ty` names the inline struct, which lives in the
/// service module.
fn contains_object(ty: &DataType) -> bool {
    match ty {
        DataType::Object(_) => true,
        DataType::Array(elem) => contains_object(elem),
        DataType::Map(key, value) => contains_object(key) || contains_object(value),
        DataType::Empty | DataType::Primitive(_) | DataType::Ref(_) | DataType::ErrorResult => {
            false
        }
    }
}

impl CodegenFile for EndpointsRs {
    fn name(&self) -> String {
        format!("endpoints \"{}\"", self.service)
    }

    fn category(&self) -> FileCategory {
        FileCategory::Endpoints
    }

    fn path_template(&self) -> Result<PathTemplate, AllocationError> {
        Ok(PathTemplate::new(format!("src/endpoints/{}{{n}}.rs", self.module))?.bare_first())
    }

    fn sections(&self, renderer: &SectionRenderer) -> Vec<Section> {
        vec![
            renderer.header(
                &format!("Endpoints of the {} service.", self.service),
                self.imports.clone(),
            ),
            renderer.body(&EndpointsTemplate, &self.data),
        ]
    }
}

#[cfg(test)]
mod tests {
    use apidef_codegen::naming::RUST_NAMING;
    use apidef_expr::{AttributeExpr, Member, MethodExpr, Primitive};

    use super::*;

    fn endpoints(service: &ServiceExpr, http: &HttpRoot) -> EndpointsRs {
        EndpointsRs::new(
            service,
            http,
            "divider",
            &RustTypeMapper::default(),
            RustNames::new(&RUST_NAMING),
        )
    }

    #[test]
    fn test_variant_without_payload() {
        let mut svc = ServiceExpr::new("divider");
        svc.methods.push(MethodExpr::new("divide"));

        let file = endpoints(&svc, &HttpRoot::default());
        let data = file.data();

        assert_eq!(data.endpoints.len(), 1);
        assert_eq!(data.endpoints[0].variant, "Divide");
        assert_eq!(data.endpoints[0].payload, None);
        assert_eq!(data.endpoints[0].route, None);
        assert_eq!(data.endpoints[0].result, "()");
        assert_eq!(
            file.imports,
            vec![
                ImportSpec::symbol("crate::services::divider", "Divider"),
                ImportSpec::symbol("crate::errors::divider", "DivideError"),
            ]
        );
    }

    #[test]
    fn test_inline_payload_is_imported_from_service_module() {
        let mut svc = ServiceExpr::new("divider");
        let mut divide = MethodExpr::new("divide");
        divide.payloads.push(AttributeExpr::new(DataType::Object(vec![Member {
            name: "a".into(),
            attribute: AttributeExpr::new(Primitive::Int.into()),
        }])));
        svc.methods.push(divide);
        let mut bulk = MethodExpr::new("bulk");
        bulk.payloads
            .push(AttributeExpr::new(DataType::array_of(DataType::named("pair"))));
        svc.methods.push(bulk);

        let file = endpoints(&svc, &HttpRoot::default());

        assert_eq!(file.data().endpoints[0].payload.as_deref(), Some("DividePayload"));
        assert_eq!(file.data().endpoints[1].payload.as_deref(), Some("Vec<Pair>"));
        assert_eq!(
            file.imports,
            vec![
                ImportSpec::symbol("crate::services::divider", "Divider"),
                ImportSpec::symbol("crate::services::divider", "DividePayload"),
                ImportSpec::symbol("crate::errors::divider", "DivideError"),
                ImportSpec::symbol("crate::types", "Pair"),
                ImportSpec::symbol("crate::errors::divider", "BulkError"),
            ]
        );
    }

    #[test]
    fn test_render_match_arms() {
        let data = EndpointsData {
            enum_name: "DividerEndpoint".into(),
            response_enum: "DividerResponse".into(),
            trait_name: "Divider".into(),
            service: "divider".into(),
            endpoints: vec![
                EndpointData {
                    method: "divide".into(),
                    variant: "Divide".into(),
                    function: "divide".into(),
                    payload: Some("DividePayload".into()),
                    result: "f64".into(),
                    error: "DivideError".into(),
                    doc: None,
                    route: Some(("POST".into(), "/api/div".into())),
                    status: 200,
                },
                EndpointData {
                    method: "reset".into(),
                    variant: "Reset".into(),
                    function: "reset".into(),
                    payload: None,
                    result: "()".into(),
                    error: "ResetError".into(),
                    doc: None,
                    route: None,
                    status: 204,
                },
            ],
        };

        let mut out = CodeBuilder::rust();
        EndpointsTemplate.render(&data, &mut out);
        let text = out.build();

        assert!(text.contains("    Divide(DividePayload),\n"));
        assert!(text.contains("pub const METHODS: &'static [&'static str] = &[\"divide\", \"reset\"];"));
        assert!(text.contains("Self::Divide(_) => Some((\"POST\", \"/api/div\")),"));
        assert!(text.contains("Self::Divide(_) => 200,"));
        assert!(text.contains("    Divide(Result<f64, DivideError>),\n    Reset(Result<(), ResetError>),\n"));
        assert!(text.contains(
            "pub fn call<S: Divider + ?Sized>(self, service: &S) -> DividerResponse {\n        \
             match self {\n            \
             Self::Divide(payload) => DividerResponse::Divide(service.divide(payload)),\n            \
             Self::Reset => DividerResponse::Reset(service.reset()),\n"
        ));
    }

    #[test]
    fn test_service_without_methods_has_no_dispatch() {
        let svc = ServiceExpr::new("divider");
        let file = endpoints(&svc, &HttpRoot::default());
        assert!(file.imports.is_empty());

        let mut out = CodeBuilder::rust();
        EndpointsTemplate.render(file.data(), &mut out);
        let text = out.build();

        assert!(text.contains("pub const METHODS: &'static [&'static str] = &[];"));
        assert!(!text.contains("DividerResponse"));
        assert!(!text.contains("fn call"));
    }
}
