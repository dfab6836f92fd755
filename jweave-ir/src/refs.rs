use crate::ty::Type;

/// A resolved handle to a callable method.
///
/// Renders as a Soot-style signature: `<java.lang.Class: java.lang.String getName()>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRef {
    pub class: String,
    pub name: String,
    pub params: Vec<Type>,
    pub ret: Type,
}

impl MethodRef {
    /// The `ret name(params)` form without the declaring class.
    pub fn sub_signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(Type::to_string).collect();
        format!("{} {}({})", self.ret, self.name, params.join(","))
    }
}

impl std::fmt::Display for MethodRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}: {}>", self.class, self.sub_signature())
    }
}

/// A resolved handle to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub class: String,
    pub name: String,
    pub ty: Type,
}

impl std::fmt::Display for FieldRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}: {} {}>", self.class, self.ty, self.name)
    }
}
