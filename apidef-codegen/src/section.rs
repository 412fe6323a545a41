//! Section rendering.
//!
//! A generated file is a list of [`Section`]s: one header carrying the
//! generated-code comment and a title, then bodies rendered by
//! [`Template`]s. Imports are kept as structured [`ImportSpec`]s on each
//! section and only turned into `use` lines by [`assemble`], so sections
//! from different templates can be merged without duplicate imports.

use serde::Serialize;

use crate::{
    builder::{CodeBuilder, Indent},
    generation::{ImportCollector, ImportSpec},
};

/// Position of a section in the assembled file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Header,
    Body,
}

/// A rendered piece of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    /// Template name (or `"header"`).
    pub name: String,
    pub imports: Vec<ImportSpec>,
    pub content: String,
}

/// Renders one kind of section from its data.
///
/// Templates only see the data struct they declare; anything they need from
/// the design has been extracted, and named, before rendering.
pub trait Template {
    type Data;

    /// Name of the section this template produces.
    fn name(&self) -> &'static str;

    /// Imports the rendered code needs.
    fn imports(&self, _data: &Self::Data) -> Vec<ImportSpec> {
        Vec::new()
    }

    fn render(&self, data: &Self::Data, out: &mut CodeBuilder);
}

/// Produces header and body sections with shared settings.
#[derive(Debug, Clone)]
pub struct SectionRenderer {
    indent: Indent,
    header: String,
}

impl SectionRenderer {
    /// `header` is the comment placed first in every file.
    pub fn new(indent: Indent, header: impl Into<String>) -> Self {
        Self {
            indent,
            header: header.into(),
        }
    }

    /// The header section: generated-code comment, then `title` as module
    /// documentation.
    pub fn header(&self, title: &str, imports: Vec<ImportSpec>) -> Section {
        let mut out = CodeBuilder::new(self.indent);
        for line in self.header.lines() {
            out.line(line);
        }
        if !title.is_empty() {
            out.blank();
            for line in title.lines() {
                out.line(format!("//! {}", line).trim_end());
            }
        }
        Section {
            kind: SectionKind::Header,
            name: "header".to_string(),
            imports,
            content: out.build(),
        }
    }

    /// Render `data` through `template` into a body section.
    pub fn body<T: Template>(&self, template: &T, data: &T::Data) -> Section {
        let mut out = CodeBuilder::new(self.indent);
        template.render(data, &mut out);
        Section {
            kind: SectionKind::Body,
            name: template.name().to_string(),
            imports: template.imports(data),
            content: out.build(),
        }
    }
}

/// Concatenate sections into file text.
///
/// Headers come first, then one `use` line per imported module collected
/// from every section, then the non-empty bodies separated by blank lines.
pub fn assemble(sections: &[Section]) -> String {
    let imports: ImportCollector = sections.iter().flat_map(|s| s.imports.iter()).collect();
    let mut out = String::new();

    for header in sections.iter().filter(|s| s.kind == SectionKind::Header) {
        out.push_str(&header.content);
    }

    if !imports.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        for line in imports.render_rust() {
            out.push_str(&line);
            out.push('\n');
        }
    }

    let bodies = sections
        .iter()
        .filter(|s| s.kind == SectionKind::Body && !s.content.trim().is_empty());
    for body in bodies {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&body.content);
    }

    out
}

/// Merge two section lists into one.
///
/// The result has at most one header (the first list's, falling back to the
/// second's) followed by the bodies of `a` then `b`. An import already carried
/// by an earlier section is dropped from later ones, and the second header's
/// imports move onto the kept header.
pub fn merge(a: Vec<Section>, b: Vec<Section>) -> Vec<Section> {
    let (mut headers, bodies): (Vec<Section>, Vec<Section>) = a
        .into_iter()
        .chain(b)
        .partition(|s| s.kind == SectionKind::Header);

    let mut out = Vec::with_capacity(bodies.len() + 1);
    if !headers.is_empty() {
        let mut header = headers.remove(0);
        for other in headers {
            header.imports.extend(other.imports);
        }
        out.push(header);
    }
    out.extend(bodies);

    let mut seen = ImportCollector::new();
    for section in &mut out {
        section.imports.retain(|spec| {
            let known = match &spec.symbol {
                Some(symbol) => seen.has_symbol(&spec.module, symbol),
                None => seen.has_module(&spec.module),
            };
            seen.add_spec(spec);
            !known
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Greeting;

    impl Template for Greeting {
        type Data = Vec<String>;

        fn name(&self) -> &'static str {
            "greeting"
        }

        fn imports(&self, _data: &Self::Data) -> Vec<ImportSpec> {
            vec![ImportSpec::symbol("std::fmt", "Display")]
        }

        fn render(&self, data: &Self::Data, out: &mut CodeBuilder) {
            out.braced("pub enum Greeting {", |out| {
                for name in data {
                    out.line(&format!("{},", name));
                }
            });
        }
    }

    fn renderer() -> SectionRenderer {
        SectionRenderer::new(Indent::RUST, "// Code generated. DO NOT EDIT.")
    }

    #[test]
    fn test_assemble_orders_header_imports_bodies() {
        let r = renderer();
        let sections = vec![
            r.body(&Greeting, &vec!["Hello".to_string()]),
            r.header("Greetings.", vec![ImportSpec::symbol("serde", "Serialize")]),
        ];

        assert_eq!(
            assemble(&sections),
            "// Code generated. DO NOT EDIT.\n\
             \n\
             //! Greetings.\n\
             \n\
             use std::fmt::Display;\n\
             use serde::Serialize;\n\
             \n\
             pub enum Greeting {\n    Hello,\n}\n"
        );
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let r = renderer();
        let data = vec!["A".to_string(), "B".to_string()];
        let build = || assemble(&[r.header("t", Vec::new()), r.body(&Greeting, &data)]);
        assert_eq!(build(), build());
    }

    #[test]
    fn test_merge_deduplicates_imports() {
        let r = renderer();
        let a = vec![
            r.header("a", vec![ImportSpec::symbol("std::fmt", "Display")]),
            r.body(&Greeting, &vec!["A".to_string()]),
        ];
        let b = vec![
            r.header("b", vec![ImportSpec::symbol("serde", "Serialize")]),
            r.body(&Greeting, &vec!["B".to_string()]),
        ];

        let merged = merge(a, b);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].kind, SectionKind::Header);
        assert!(merged[0].content.contains("//! a"));
        assert_eq!(
            merged[0].imports,
            vec![
                ImportSpec::symbol("std::fmt", "Display"),
                ImportSpec::symbol("serde", "Serialize"),
            ]
        );
        assert!(merged[1].imports.is_empty());
        assert!(merged[2].imports.is_empty());

        let text = assemble(&merged);
        assert_eq!(text.matches("use std::fmt::Display;").count(), 1);
    }

    #[test]
    fn test_empty_bodies_are_skipped() {
        struct Nothing;
        impl Template for Nothing {
            type Data = ();
            fn name(&self) -> &'static str {
                "nothing"
            }
            fn render(&self, _data: &(), _out: &mut CodeBuilder) {}
        }

        let r = renderer();
        let text = assemble(&[r.header("", Vec::new()), r.body(&Nothing, &())]);
        assert_eq!(text, "// Code generated. DO NOT EDIT.\n");
    }
}
