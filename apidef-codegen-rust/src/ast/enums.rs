//! Rust enum builder.

use apidef_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A variant in a Rust enum.
#[derive(Debug, Clone)]
pub struct Variant {
    pub name: String,
    pub doc: Option<String>,
    pub data: Option<String>,
}

impl Variant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            data: None,
        }
    }

    /// Set the doc comment; `None` leaves the variant undocumented.
    pub fn doc(mut self, doc: Option<impl Into<String>>) -> Self {
        self.doc = doc.map(Into::into);
        self
    }

    /// Set tuple data for the variant, e.g., `Divide(DividePayload)`.
    pub fn tuple(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// The pattern matching this variant and ignoring its data.
    pub fn pattern(&self) -> String {
        match &self.data {
            Some(_) => format!("Self::{}(_)", self.name),
            None => format!("Self::{}", self.name),
        }
    }
}

/// Builder for Rust enums.
#[derive(Debug, Clone)]
pub struct Enum {
    name: String,
    doc: Option<String>,
    derives: Vec<String>,
    variants: Vec<Variant>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            derives: Vec::new(),
            variants: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn derive(mut self, derive: impl Into<String>) -> Self {
        self.derives.push(derive.into());
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn variants(mut self, variants: impl IntoIterator<Item = Variant>) -> Self {
        self.variants.extend(variants);
        self
    }

    /// Build the enum as a string.
    pub fn build(&self) -> String {
        let mut out = CodeBuilder::rust();
        out.emit(self);
        out.build()
    }

    fn variants_to_fragments(&self) -> Vec<CodeFragment> {
        self.variants
            .iter()
            .flat_map(|variant| {
                let mut fragments = Vec::new();
                if let Some(doc) = &variant.doc {
                    fragments.push(CodeFragment::doc(doc.clone()));
                }
                let line = match &variant.data {
                    Some(data) => format!("{}({}),", variant.name, data),
                    None => format!("{},", variant.name),
                };
                fragments.push(CodeFragment::Line(line));
                fragments
            })
            .collect()
    }
}

impl Renderable for Enum {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc.clone()));
        }

        if !self.derives.is_empty() {
            fragments.push(CodeFragment::Line(format!(
                "#[derive({})]",
                self.derives.join(", ")
            )));
        }

        if self.variants.is_empty() {
            fragments.push(CodeFragment::Line(format!("pub enum {} {{}}", self.name)));
        } else {
            fragments.push(CodeFragment::braced(
                format!("pub enum {} {{", self.name),
                self.variants_to_fragments(),
            ));
        }

        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_enum() {
        let e = Enum::new("ModuloError").build();
        assert_eq!(e, "pub enum ModuloError {}\n");
    }

    #[test]
    fn test_enum_with_derives() {
        let e = Enum::new("Status")
            .derive("Debug")
            .derive("Clone")
            .variant(Variant::new("Active"))
            .variant(Variant::new("Inactive"))
            .build();
        assert!(e.contains("#[derive(Debug, Clone)]"));
        assert!(e.contains("pub enum Status {"));
        assert!(e.contains("    Active,"));
        assert!(e.contains("    Inactive,"));
    }

    #[test]
    fn test_tuple_variants_and_patterns() {
        let divide = Variant::new("Divide").tuple("DividePayload");
        let modulo = Variant::new("Modulo");
        assert_eq!(divide.pattern(), "Self::Divide(_)");
        assert_eq!(modulo.pattern(), "Self::Modulo");

        let e = Enum::new("DividerEndpoint").variant(divide).variant(modulo).build();
        assert!(e.contains("Divide(DividePayload),"));
        assert!(e.contains("Modulo,"));
    }

    #[test]
    fn test_variant_with_doc() {
        let e = Enum::new("DivideError")
            .variant(Variant::new("DivByZero").doc(Some("Division by zero")))
            .variant(Variant::new("Overflow").doc(None::<String>))
            .build();
        assert_eq!(
            e,
            "pub enum DivideError {\n    /// Division by zero\n    DivByZero,\n    Overflow,\n}\n"
        );
    }
}
