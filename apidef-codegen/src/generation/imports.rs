//! Import collection and deduplication.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

/// One import required by a section: a module path and optionally a symbol
/// from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ImportSpec {
    pub module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl ImportSpec {
    /// Import `symbol` from `module`, e.g. `serde` / `Serialize`.
    pub fn symbol(module: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbol: Some(symbol.into()),
        }
    }

    /// Import a module by itself, e.g. `std::fmt`.
    pub fn module(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbol: None,
        }
    }
}

/// Tracks imports and deduplicates them.
///
/// Modules keep their first-seen order; symbols within a module are sorted.
///
/// # Example
///
/// ```
/// use apidef_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("serde", "Serialize");
/// imports.add("serde", "Deserialize");
/// imports.add_module("std::fmt");
///
/// assert_eq!(
///     imports.render_rust(),
///     vec!["use serde::{Deserialize, Serialize};", "use std::fmt;"]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    imports: IndexMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol import from a module.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    /// Add a module import without specific symbols.
    pub fn add_module(&mut self, module: &str) {
        self.imports.entry(module.to_string()).or_default();
    }

    pub fn add_spec(&mut self, spec: &ImportSpec) {
        match &spec.symbol {
            Some(symbol) => self.add(&spec.module, symbol),
            None => self.add_module(&spec.module),
        }
    }

    /// Merge another collector into this one.
    pub fn merge(&mut self, other: &ImportCollector) {
        for (module, symbols) in &other.imports {
            let entry = self.imports.entry(module.clone()).or_default();
            entry.extend(symbols.iter().cloned());
        }
    }

    pub fn has_module(&self, module: &str) -> bool {
        self.imports.contains_key(module)
    }

    pub fn has_symbol(&self, module: &str, symbol: &str) -> bool {
        self.imports
            .get(module)
            .is_some_and(|symbols| symbols.contains(symbol))
    }

    /// Iterate over all imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Flatten back into import specs, in rendering order.
    pub fn specs(&self) -> Vec<ImportSpec> {
        let mut out = Vec::new();
        for (module, symbols) in self.iter() {
            if symbols.is_empty() {
                out.push(ImportSpec::module(module));
            }
            for symbol in symbols {
                out.push(ImportSpec::symbol(module, symbol));
            }
        }
        out
    }

    /// Render as Rust `use` declarations, one per module.
    pub fn render_rust(&self) -> Vec<String> {
        self.iter()
            .map(|(module, symbols)| match symbols.len() {
                0 => format!("use {};", module),
                1 => format!("use {}::{};", module, symbols.iter().next().map_or("", |s| s)),
                _ => {
                    let symbols: Vec<&str> = symbols.iter().map(String::as_str).collect();
                    format!("use {}::{{{}}};", module, symbols.join(", "))
                }
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Get the number of modules.
    pub fn len(&self) -> usize {
        self.imports.len()
    }
}

impl<'a> FromIterator<&'a ImportSpec> for ImportCollector {
    fn from_iter<I: IntoIterator<Item = &'a ImportSpec>>(iter: I) -> Self {
        let mut collector = Self::new();
        for spec in iter {
            collector.add_spec(spec);
        }
        collector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_collector_basic() {
        let mut imports = ImportCollector::new();
        imports.add("std::io", "Read");
        imports.add("std::io", "Write");
        imports.add("std::collections", "HashMap");

        assert!(imports.has_module("std::io"));
        assert!(imports.has_symbol("std::io", "Read"));
        assert!(!imports.has_symbol("std::io", "Seek"));
        assert_eq!(imports.len(), 2);
    }

    #[test]
    fn test_import_collector_merge() {
        let mut a = ImportCollector::new();
        a.add("std::io", "Read");

        let mut b = ImportCollector::new();
        b.add("std::io", "Write");
        b.add("std::fs", "File");

        a.merge(&b);

        assert!(a.has_symbol("std::io", "Read"));
        assert!(a.has_symbol("std::io", "Write"));
        assert!(a.has_module("std::fs"));
    }

    #[test]
    fn test_duplicate_specs_render_once() {
        let specs = [
            ImportSpec::symbol("serde", "Serialize"),
            ImportSpec::symbol("crate::types", "ErrorResult"),
            ImportSpec::symbol("serde", "Serialize"),
        ];
        let imports: ImportCollector = specs.iter().collect();

        assert_eq!(
            imports.render_rust(),
            vec!["use serde::Serialize;", "use crate::types::ErrorResult;"]
        );
        assert_eq!(imports.specs().len(), 2);
    }
}
