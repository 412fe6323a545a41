//! Module files tying generated files together: `src/lib.rs` and the
//! `mod.rs` of each generated directory.

use apidef_codegen::{
    CodegenFile,
    builder::CodeBuilder,
    generation::FileCategory,
    paths::{AllocationError, PathTemplate},
    section::{Section, SectionRenderer, Template},
};

use super::quoted;

/// A `pub mod` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModDecl {
    pub name: String,
    /// File holding the module, relative to the declaring file's directory.
    /// Emitted as `#[path]` when it is not where rustc would look.
    pub path: Option<String>,
}

impl ModDecl {
    /// A module in a single file.
    pub fn file(name: impl Into<String>, path: &str) -> Self {
        let name = name.into();
        let conventional = format!("{}.rs", name);
        Self::with_path(name, path, &conventional)
    }

    /// A module in a directory with its own `mod.rs`.
    pub fn directory(name: impl Into<String>, path: &str) -> Self {
        let name = name.into();
        let conventional = format!("{}/mod.rs", name);
        Self::with_path(name, path, &conventional)
    }

    fn with_path(name: String, path: &str, conventional: &str) -> Self {
        let path = (path != conventional).then(|| path.to_string());
        Self { name, path }
    }
}

struct ModTemplate;

impl Template for ModTemplate {
    type Data = Vec<ModDecl>;

    fn name(&self) -> &'static str {
        "modules"
    }

    fn render(&self, decls: &Vec<ModDecl>, out: &mut CodeBuilder) {
        for decl in decls {
            if let Some(path) = &decl.path {
                out.line(&format!("#[path = {}]", quoted(path)));
            }
            out.line(&format!("pub mod {};", decl.name));
        }
    }
}

/// A module file. The crate root lives at `src/lib.rs`; directory modules
/// at `src/<dir>/mod.rs`.
pub struct ModRs {
    dir: String,
    title: String,
    decls: Vec<ModDecl>,
}

impl ModRs {
    pub fn root(api: &str, decls: Vec<ModDecl>) -> Self {
        Self {
            dir: "src/".to_string(),
            title: format!("Generated code for the {} API.", api),
            decls,
        }
    }

    pub fn directory(name: &str, decls: Vec<ModDecl>) -> Self {
        Self {
            dir: format!("src/{}/", name),
            title: format!("Generated {}, one module per service.", name),
            decls,
        }
    }

    /// Directory the declarations are relative to, ending in `/`.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    pub fn decls(&self) -> &[ModDecl] {
        &self.decls
    }

    fn is_root(&self) -> bool {
        self.dir == "src/"
    }
}

impl CodegenFile for ModRs {
    fn name(&self) -> String {
        format!("module \"{}\"", self.dir.trim_end_matches('/'))
    }

    fn category(&self) -> FileCategory {
        FileCategory::Module
    }

    fn path_template(&self) -> Result<PathTemplate, AllocationError> {
        let stem = if self.is_root() { "lib" } else { "mod" };
        Ok(PathTemplate::new(format!("{}{}{{n}}.rs", self.dir, stem))?.bare_first())
    }

    fn sections(&self, renderer: &SectionRenderer) -> Vec<Section> {
        vec![
            renderer.header(&self.title, Vec::new()),
            renderer.body(&ModTemplate, &self.decls),
        ]
    }
}
