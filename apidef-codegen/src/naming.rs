//! Naming conventions for generated identifiers.

use apidef_core::{to_pascal_case, to_snake_case};

/// Target-language naming rules.
///
/// Every identifier derived from a design name goes through one of these
/// transforms, so templates never case names themselves.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Design name to type name (e.g. "div_by_zero" -> "DivByZero")
    pub to_type: fn(&str) -> String,
    /// Design name to module / file stem (e.g. "DivideRequest" -> "divide_request")
    pub to_module: fn(&str) -> String,
    /// Design name to field or function name
    pub to_field: fn(&str) -> String,
    /// Words that cannot be used verbatim as identifiers
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g. "type" -> "r#type")
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Type, trait, enum variant name.
    pub fn type_name(&self, name: &str) -> String {
        let transformed = (self.to_type)(name);
        self.safe_name(&transformed)
    }

    /// Module name, also used as file stem. Not escaped: a reserved module
    /// name gets a different stem from the path allocator instead.
    pub fn module_name(&self, name: &str) -> String {
        (self.to_module)(name)
    }

    /// Field, function, or argument name.
    pub fn field_name(&self, name: &str) -> String {
        let transformed = (self.to_field)(name);
        self.safe_name(&transformed)
    }
}

fn escape_rust_reserved(name: &str) -> String {
    match name {
        // Raw identifiers cannot be used for these.
        "self" | "Self" | "super" | "crate" => format!("{}_", name),
        _ => format!("r#{}", name),
    }
}

/// Rust naming conventions.
pub const RUST_NAMING: NamingConvention = NamingConvention {
    to_type: to_pascal_case,
    to_module: to_snake_case,
    to_field: to_snake_case,
    reserved_words: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
        "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
        "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
        "final", "gen", "macro", "override", "priv", "try", "typeof", "unsized", "virtual",
        "yield",
    ],
    escape_reserved: escape_rust_reserved,
};

impl Default for NamingConvention {
    fn default() -> Self {
        RUST_NAMING
    }
}
