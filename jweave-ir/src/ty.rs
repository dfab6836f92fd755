use serde::{Deserialize, Serialize};

/// Fully qualified name of the string class.
pub const STRING_CLASS: &str = "java.lang.String";

/// Primitive value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimKind {
    /// Source-level keyword, used to select conversion overloads
    /// (`valueOf(int)`, `valueOf(char)`, ...).
    pub fn name(self) -> &'static str {
        match self {
            PrimKind::Boolean => "boolean",
            PrimKind::Byte => "byte",
            PrimKind::Char => "char",
            PrimKind::Short => "short",
            PrimKind::Int => "int",
            PrimKind::Long => "long",
            PrimKind::Float => "float",
            PrimKind::Double => "double",
        }
    }

    pub fn parse(name: &str) -> Option<PrimKind> {
        Some(match name {
            "boolean" => PrimKind::Boolean,
            "byte" => PrimKind::Byte,
            "char" => PrimKind::Char,
            "short" => PrimKind::Short,
            "int" => PrimKind::Int,
            "long" => PrimKind::Long,
            "float" => PrimKind::Float,
            "double" => PrimKind::Double,
            _ => return None,
        })
    }

    /// All primitive kinds, in declaration order.
    pub const ALL: [PrimKind; 8] = [
        PrimKind::Boolean,
        PrimKind::Byte,
        PrimKind::Char,
        PrimKind::Short,
        PrimKind::Int,
        PrimKind::Long,
        PrimKind::Float,
        PrimKind::Double,
    ];
}

impl std::fmt::Display for PrimKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic type of an operand or signature slot.
///
/// The string type gets its own variant because the coercion protocol
/// dispatches on it; every other reference type is carried by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Type {
    String,
    Prim(PrimKind),
    Ref(String),
    Void,
}

impl Type {
    /// Parse a textual type name. Unknown names become reference types.
    pub fn parse(name: &str) -> Type {
        if name == STRING_CLASS {
            Type::String
        } else if name == "void" {
            Type::Void
        } else if let Some(kind) = PrimKind::parse(name) {
            Type::Prim(kind)
        } else {
            Type::Ref(name.to_string())
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Type::String)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Prim(_))
    }

    /// The class name for reference-shaped types.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Type::String => Some(STRING_CLASS),
            Type::Ref(name) => Some(name),
            Type::Prim(_) | Type::Void => None,
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::String => f.write_str(STRING_CLASS),
            Type::Prim(kind) => f.write_str(kind.name()),
            Type::Ref(name) => f.write_str(name),
            Type::Void => f.write_str("void"),
        }
    }
}

impl From<String> for Type {
    fn from(name: String) -> Type {
        Type::parse(&name)
    }
}

impl From<Type> for String {
    fn from(ty: Type) -> String {
        ty.to_string()
    }
}
