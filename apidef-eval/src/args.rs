use apidef_expr::{AttributeExpr, DataType, Primitive};

/// Optional arguments of the attribute-shaped builders (`error`, `payload`,
/// `result`, `attribute`).
///
/// Most call sites pass one of the `From` shorthands:
///
/// ```
/// use apidef_eval::AttributeArgs;
/// use apidef_expr::{DataType, Primitive};
///
/// let _: AttributeArgs = ().into();
/// let _: AttributeArgs = Primitive::Int.into();
/// let _: AttributeArgs = "Left operand".into();
/// let _: AttributeArgs = (DataType::named("Operands"), "The operands").into();
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeArgs {
    pub ty: Option<DataType>,
    pub description: Option<String>,
    /// Allow an error to reuse a built-in error name.
    pub override_builtin: bool,
}

impl AttributeArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, ty: impl Into<DataType>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn override_builtin(mut self) -> Self {
        self.override_builtin = true;
        self
    }

    /// Build the attribute, using `default` when no type was given.
    pub(crate) fn to_attribute(&self, default: DataType) -> AttributeExpr {
        AttributeExpr {
            ty: self.ty.clone().unwrap_or(default),
            description: self.description.clone(),
        }
    }
}

impl From<()> for AttributeArgs {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl From<DataType> for AttributeArgs {
    fn from(ty: DataType) -> Self {
        Self::new().with_type(ty)
    }
}

impl From<Primitive> for AttributeArgs {
    fn from(p: Primitive) -> Self {
        Self::new().with_type(p)
    }
}

impl From<&str> for AttributeArgs {
    fn from(description: &str) -> Self {
        Self::new().with_description(description)
    }
}

impl From<(DataType, &str)> for AttributeArgs {
    fn from((ty, description): (DataType, &str)) -> Self {
        Self::new().with_type(ty).with_description(description)
    }
}

impl From<(Primitive, &str)> for AttributeArgs {
    fn from((p, description): (Primitive, &str)) -> Self {
        Self::new().with_type(p).with_description(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_type_applies_only_when_missing() {
        let args = AttributeArgs::from("left operand");
        let attr = args.to_attribute(Primitive::String.into());
        assert_eq!(attr.ty, DataType::Primitive(Primitive::String));
        assert_eq!(attr.description.as_deref(), Some("left operand"));

        let args = AttributeArgs::from(Primitive::Int);
        assert_eq!(
            args.to_attribute(Primitive::String.into()).ty,
            DataType::Primitive(Primitive::Int)
        );
    }

    #[test]
    fn test_override_builtin() {
        let args = AttributeArgs::from(()).override_builtin();
        assert!(args.override_builtin);
        assert!(args.ty.is_none());
    }
}
