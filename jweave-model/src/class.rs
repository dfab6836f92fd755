use jweave_ir::{MethodRef, Type};

use crate::body::MethodBody;
use crate::modifiers::Modifiers;

/// A field declaration.
#[derive(Debug, Clone)]
pub struct FieldModel {
    pub name: String,
    pub ty: Type,
    pub modifiers: Modifiers,
}

/// A method declaration, optionally with a body.
#[derive(Debug, Clone)]
pub struct MethodModel {
    pub name: String,
    pub params: Vec<Type>,
    pub ret: Type,
    pub modifiers: Modifiers,
    pub body: Option<MethodBody>,
}

impl MethodModel {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// The `ret name(params)` form without the declaring class.
    pub fn sub_signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(Type::to_string).collect();
        format!("{} {}({})", self.ret, self.name, params.join(","))
    }

    /// The full Soot-style signature.
    pub fn signature(&self, class: &str) -> String {
        format!("<{}: {}>", class, self.sub_signature())
    }

    /// A resolved reference to this method as declared in `class`.
    pub fn as_ref(&self, class: &str) -> MethodRef {
        MethodRef {
            class: class.to_string(),
            name: self.name.clone(),
            params: self.params.clone(),
            ret: self.ret.clone(),
        }
    }
}

/// A class declaration with hierarchy link, fields, and methods.
#[derive(Debug, Clone)]
pub struct ClassModel {
    pub name: String,
    pub superclass: Option<String>,
    pub modifiers: Modifiers,
    pub fields: Vec<FieldModel>,
    pub methods: Vec<MethodModel>,
}

impl ClassModel {
    /// The package part of the name, empty for the default package.
    pub fn package_name(&self) -> &str {
        match self.name.rfind('.') {
            Some(dot) => &self.name[..dot],
            None => "",
        }
    }

    /// The name without its package.
    pub fn short_name(&self) -> &str {
        match self.name.rfind('.') {
            Some(dot) => &self.name[dot + 1..],
            None => &self.name,
        }
    }

    pub fn is_interface(&self) -> bool {
        self.modifiers.contains(Modifiers::INTERFACE)
    }

    /// Exact-signature method lookup.
    pub fn method(&self, name: &str, params: &[Type]) -> Option<&MethodModel> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.params == params)
    }

    /// First method with the given name, regardless of parameters.
    pub fn method_by_name(&self, name: &str) -> Option<&MethodModel> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> ClassModel {
        ClassModel {
            name: name.to_string(),
            superclass: None,
            modifiers: Modifiers::PUBLIC,
            fields: vec![],
            methods: vec![],
        }
    }

    #[test]
    fn package_and_short_name() {
        let c = class("com.example.app.MainActivity");
        assert_eq!(c.package_name(), "com.example.app");
        assert_eq!(c.short_name(), "MainActivity");

        let d = class("Standalone");
        assert_eq!(d.package_name(), "");
        assert_eq!(d.short_name(), "Standalone");
    }

    #[test]
    fn signatures() {
        let m = MethodModel {
            name: "onClick".to_string(),
            params: vec![Type::parse("android.view.View")],
            ret: Type::Void,
            modifiers: Modifiers::PUBLIC,
            body: None,
        };
        assert_eq!(
            m.signature("com.example.app.MainActivity"),
            "<com.example.app.MainActivity: void onClick(android.view.View)>"
        );
    }
}
