//! Rust trait builder.

use apidef_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A required method of a trait, taking `&self`.
#[derive(Debug, Clone)]
pub struct TraitMethod {
    pub name: String,
    pub doc: Option<String>,
    pub params: Vec<(String, String)>,
    pub returns: Option<String>,
}

impl TraitMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            params: Vec::new(),
            returns: None,
        }
    }

    pub fn doc(mut self, doc: Option<impl Into<String>>) -> Self {
        self.doc = doc.map(Into::into);
        self
    }

    pub fn param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push((name.into(), ty.into()));
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.returns = Some(ty.into());
        self
    }

    fn signature(&self) -> String {
        let mut params = vec!["&self".to_string()];
        params.extend(self.params.iter().map(|(n, t)| format!("{}: {}", n, t)));
        match &self.returns {
            Some(ret) => format!("fn {}({}) -> {};", self.name, params.join(", "), ret),
            None => format!("fn {}({});", self.name, params.join(", ")),
        }
    }
}

/// Builder for public Rust traits.
#[derive(Debug, Clone)]
pub struct Trait {
    name: String,
    doc: Option<String>,
    methods: Vec<TraitMethod>,
}

impl Trait {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            methods: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: Option<impl Into<String>>) -> Self {
        self.doc = doc.map(Into::into);
        self
    }

    pub fn method(mut self, method: TraitMethod) -> Self {
        self.methods.push(method);
        self
    }

    pub fn build(&self) -> String {
        let mut out = CodeBuilder::rust();
        out.emit(self);
        out.build()
    }
}

impl Renderable for Trait {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc.clone()));
        }

        if self.methods.is_empty() {
            fragments.push(CodeFragment::Line(format!("pub trait {} {{}}", self.name)));
            return fragments;
        }

        let mut body = Vec::new();
        for (i, method) in self.methods.iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::Blank);
            }
            if let Some(doc) = &method.doc {
                body.push(CodeFragment::doc(doc.clone()));
            }
            body.push(CodeFragment::Line(method.signature()));
        }
        fragments.push(CodeFragment::braced(format!("pub trait {} {{", self.name), body));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_methods() {
        let t = Trait::new("Divider")
            .doc(Some("Integer division"))
            .method(
                TraitMethod::new("divide")
                    .param("payload", "DividePayload")
                    .returns("Result<i64, DivideError>"),
            )
            .method(TraitMethod::new("reset"))
            .build();

        assert_eq!(
            t,
            "/// Integer division\npub trait Divider {\n    fn divide(&self, payload: DividePayload) -> Result<i64, DivideError>;\n\n    fn reset(&self);\n}\n"
        );
    }

    #[test]
    fn test_empty_trait() {
        assert_eq!(Trait::new("Idle").build(), "pub trait Idle {}\n");
    }
}
