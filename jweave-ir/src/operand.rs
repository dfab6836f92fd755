use crate::refs::FieldRef;
use crate::ty::Type;

/// A uniquely named typed local binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Temp {
    pub name: String,
    pub ty: Type,
}

impl Temp {
    pub fn new(name: impl Into<String>, ty: Type) -> Temp {
        Temp {
            name: name.into(),
            ty,
        }
    }
}

impl std::fmt::Display for Temp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A typed value reference used in synthesized instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// String constant.
    StringLit(String),
    /// The null constant.
    NullConst,
    /// A local binding (pre-existing or freshly allocated).
    Temp(Temp),
    /// The method's n-th parameter.
    Param { index: usize, ty: Type },
    /// The method's `this` reference.
    This { ty: Type },
    /// A bare static field reference. Representable but not an invokable
    /// value; coercion rejects it.
    StaticField(FieldRef),
}

impl Operand {
    pub fn ty(&self) -> Type {
        match self {
            Operand::StringLit(_) => Type::String,
            Operand::NullConst => Type::Ref("null".to_string()),
            Operand::Temp(t) => t.ty.clone(),
            Operand::Param { ty, .. } => ty.clone(),
            Operand::This { ty } => ty.clone(),
            Operand::StaticField(field) => field.ty.clone(),
        }
    }

    /// Whether this operand names a resolvable runtime value that a call
    /// can be dispatched on.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Operand::Temp(_) | Operand::Param { .. } | Operand::This { .. }
        )
    }
}

impl From<Temp> for Operand {
    fn from(t: Temp) -> Operand {
        Operand::Temp(t)
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::StringLit(s) => write!(f, "\"{}\"", s.escape_default()),
            Operand::NullConst => f.write_str("null"),
            Operand::Temp(t) => f.write_str(&t.name),
            Operand::Param { index, .. } => write!(f, "@parameter{index}"),
            Operand::This { .. } => f.write_str("@this"),
            Operand::StaticField(field) => write!(f, "{field}"),
        }
    }
}
