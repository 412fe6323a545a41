//! Rust code generator.

use apidef_codegen::{
    CodegenFile, GenerateReport, GeneratorConfig, LanguageCodegen, render_file,
    language::allocation_diagnostic,
    paths::{PathTemplate, ReservedPaths, unique_path},
    pipeline::Design,
    section::SectionRenderer,
};
use apidef_expr::ServiceExpr;

use crate::{
    files::{EndpointsRs, ErrorsRs, ModDecl, ModRs, RustNames, ServiceRs, TypesRs},
    type_mapper::RustTypeMapper,
};

/// Directories holding one module per service, in output order.
const SERVICE_DIRS: [&str; 3] = ["errors", "services", "endpoints"];

/// Rust code generator.
///
/// Produces `src/lib.rs`, a shared `src/types.rs`, and per service an error
/// module, a service trait module and an endpoints module.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Allocate one module name per service. Names collide when two service
    /// names case to the same identifier or one is a Rust keyword; later
    /// ones get a numeric suffix.
    fn service_modules<'d>(
        &self,
        design: &'d Design,
        report: &mut GenerateReport,
    ) -> Vec<(&'d ServiceExpr, String)> {
        let naming = &self.config.naming;
        let mut taken: ReservedPaths = naming.reserved_words.iter().copied().collect();

        design
            .services()
            .iter()
            .filter_map(|svc| {
                let stem = naming.module_name(&svc.name);
                let module = PathTemplate::new(format!("{}{{n}}", stem))
                    .and_then(|t| unique_path(&t.bare_first(), &mut taken));
                match module {
                    Ok(module) => {
                        tracing::trace!(service = %svc.name, %module, "module name");
                        Some((svc, module))
                    }
                    Err(err) => {
                        let location = format!("service \"{}\"", svc.name);
                        report.failures.push(allocation_diagnostic(&location, &err));
                        None
                    }
                }
            })
            .collect()
    }
}

impl LanguageCodegen for Generator {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    #[tracing::instrument(level = "debug", skip_all, fields(design = %design.name()))]
    fn generate(&self, design: &Design, reserved: &mut ReservedPaths) -> GenerateReport {
        let renderer = self.config.renderer();
        let names = RustNames::new(&self.config.naming);
        let mapper = RustTypeMapper::new(self.config.naming);
        let mut report = GenerateReport::new();
        let mut run = Run {
            renderer: &renderer,
            reserved,
            report: &mut report,
        };

        let mut root = Vec::new();
        let types = TypesRs::new(design, &mapper, names);
        if let Some(path) = run.emit(&types) {
            root.push(ModDecl::file("types", relative(&path, "src/")));
        }

        let modules = self.service_modules(design, run.report);
        let mut dirs: [Vec<ModDecl>; 3] = Default::default();
        for (svc, module) in &modules {
            let files: [Box<dyn CodegenFile>; 3] = [
                Box::new(ErrorsRs::new(svc, module, &mapper, names)),
                Box::new(ServiceRs::new(svc, module, &mapper, names)),
                Box::new(EndpointsRs::new(svc, &design.root().http, module, &mapper, names)),
            ];
            for ((file, dir), decls) in files.iter().zip(SERVICE_DIRS).zip(dirs.iter_mut()) {
                if let Some(path) = run.emit(&**file) {
                    let base = format!("src/{}/", dir);
                    decls.push(ModDecl::file(module.as_str(), relative(&path, &base)));
                }
            }
        }

        for (dir, decls) in SERVICE_DIRS.into_iter().zip(dirs) {
            if decls.is_empty() {
                continue;
            }
            if let Some(path) = run.emit(&ModRs::directory(dir, decls)) {
                root.push(ModDecl::directory(dir, relative(&path, "src/")));
            }
        }

        run.emit(&ModRs::root(design.name(), root));

        tracing::debug!(
            files = report.files.len(),
            failures = report.failures.len(),
            "generated rust files"
        );
        report
    }
}

/// State of one generation run.
struct Run<'a> {
    renderer: &'a SectionRenderer,
    reserved: &'a mut ReservedPaths,
    report: &'a mut GenerateReport,
}

impl Run<'_> {
    /// Render `file` into the report, returning its path on success.
    fn emit(&mut self, file: &dyn CodegenFile) -> Option<String> {
        let outcome = render_file(file, self.renderer, self.reserved);
        let path = outcome.as_ref().ok().map(|f| f.path.clone());
        self.report.push(outcome);
        path
    }
}

/// `path` relative to `dir` (which ends in `/`).
fn relative<'p>(path: &'p str, dir: &str) -> &'p str {
    path.strip_prefix(dir).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use apidef_codegen::Pipeline;
    use apidef_eval::evaluate;

    use super::*;

    fn design(body: impl FnOnce(&mut apidef_eval::Evaluator)) -> Design {
        Pipeline::new().run(evaluate(body)).expect("design should be valid")
    }

    #[test]
    fn test_file_layout() {
        let design = design(|ev| {
            ev.service("divider", |ev| ev.method("divide", |_| {}));
        });
        let report = Generator::default().generate(&design, &mut ReservedPaths::new());

        assert!(report.is_success());
        assert_eq!(
            report.paths(),
            vec![
                "src/types.rs",
                "src/errors/divider.rs",
                "src/services/divider.rs",
                "src/endpoints/divider.rs",
                "src/errors/mod.rs",
                "src/services/mod.rs",
                "src/endpoints/mod.rs",
                "src/lib.rs",
            ]
        );
    }

    #[test]
    fn test_keyword_service_gets_suffixed_module() {
        let design = design(|ev| {
            ev.service("match", |_| {});
            ev.service("Match", |_| {});
        });
        let report = Generator::default().generate(&design, &mut ReservedPaths::new());

        assert!(report.file("src/errors/match0.rs").is_some());
        assert!(report.file("src/errors/match1.rs").is_some());
        let errors_mod = report.file("src/errors/mod.rs").unwrap();
        assert!(errors_mod.content.contains("pub mod match0;\npub mod match1;\n"));
    }

    #[test]
    fn test_reserved_path_moves_file_and_adds_path_attribute() {
        let design = design(|ev| {
            ev.service("divider", |ev| ev.method("divide", |_| {}));
        });
        let mut reserved: ReservedPaths = ["src/services/divider.rs"].into_iter().collect();
        let report = Generator::default().generate(&design, &mut reserved);

        assert!(report.file("src/services/divider0.rs").is_some());
        let services_mod = report.file("src/services/mod.rs").unwrap();
        assert!(
            services_mod
                .content
                .contains("#[path = \"divider0.rs\"]\npub mod divider;\n")
        );
    }

    #[test]
    fn test_relative() {
        assert_eq!(relative("src/errors/divider.rs", "src/errors/"), "divider.rs");
        assert_eq!(relative("other/x.rs", "src/"), "other/x.rs");
    }
}
