//! Serializable program documents.
//!
//! A program document is the YAML form the CLI reads and writes: class
//! declarations with method signatures and bodies as plain text lines.
//! Building a document produces [`ClassModel`]s whose bodies carry the
//! binding prologue followed by the document's lines as `Raw` units.

use serde::{Deserialize, Serialize};

use jweave_ir::{Temp, Type};

use crate::body::{MethodBody, Unit};
use crate::class::{ClassModel, FieldModel, MethodModel};
use crate::modifiers::Modifiers;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramDoc {
    pub classes: Vec<ClassDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDoc {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDoc {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Type>,
    #[serde(default = "void", rename = "returns")]
    pub ret: Type,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<String>>,
}

fn void() -> Type {
    Type::Void
}

impl ProgramDoc {
    /// Build class models from the document.
    pub fn build(&self) -> Vec<ClassModel> {
        self.classes.iter().map(ClassDoc::build).collect()
    }

    /// Render models back into a document, bodies as display lines.
    pub fn from_classes(classes: &[ClassModel]) -> ProgramDoc {
        ProgramDoc {
            classes: classes.iter().map(ClassDoc::from_class).collect(),
        }
    }
}

impl ClassDoc {
    fn build(&self) -> ClassModel {
        let methods = self
            .methods
            .iter()
            .map(|m| m.build(&self.name))
            .collect();
        ClassModel {
            name: self.name.clone(),
            superclass: self.superclass.clone(),
            modifiers: Modifiers::from_names(&self.modifiers),
            fields: self
                .fields
                .iter()
                .map(|f| FieldModel {
                    name: f.name.clone(),
                    ty: f.ty.clone(),
                    modifiers: Modifiers::from_names(&f.modifiers),
                })
                .collect(),
            methods,
        }
    }

    fn from_class(class: &ClassModel) -> ClassDoc {
        ClassDoc {
            name: class.name.clone(),
            superclass: class.superclass.clone(),
            modifiers: class.modifiers.names().iter().map(|s| s.to_string()).collect(),
            fields: class
                .fields
                .iter()
                .map(|f| FieldDoc {
                    name: f.name.clone(),
                    ty: f.ty.clone(),
                    modifiers: f.modifiers.names().iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
            methods: class
                .methods
                .iter()
                .map(|m| MethodDoc {
                    name: m.name.clone(),
                    params: m.params.clone(),
                    ret: m.ret.clone(),
                    modifiers: m.modifiers.names().iter().map(|s| s.to_string()).collect(),
                    body: m
                        .body
                        .as_ref()
                        .map(|b| b.units.iter().map(|u| u.to_string()).collect()),
                })
                .collect(),
        }
    }
}

impl MethodDoc {
    fn build(&self, class_name: &str) -> MethodModel {
        MethodModel {
            name: self.name.clone(),
            params: self.params.clone(),
            ret: self.ret.clone(),
            modifiers: Modifiers::from_names(&self.modifiers),
            body: self.body.as_ref().map(|_| self.build_body(class_name)),
        }
    }

    /// A method body gets the binding prologue (`this` for instance
    /// methods, then one local per parameter), then the document's lines.
    fn build_body(&self, class_name: &str) -> MethodBody {
        let modifiers = Modifiers::from_names(&self.modifiers);
        let this_ty = if modifiers.contains(Modifiers::STATIC) {
            None
        } else {
            Some(Type::parse(class_name))
        };
        let mut body = MethodBody::new(this_ty.clone());

        if let Some(ty) = this_ty {
            body.declare_local(Temp::new("this", ty));
            body.units.push(Unit::BindThis {
                local: "this".to_string(),
            });
        }
        for (index, ty) in self.params.iter().enumerate() {
            let local = format!("$p{index}");
            body.declare_local(Temp::new(local.clone(), ty.clone()));
            body.units.push(Unit::BindParam { local, index });
        }
        for line in self.body.iter().flatten() {
            if line == "return" {
                body.units.push(Unit::Return(None));
            } else {
                body.units.push(Unit::Raw(line.clone()));
            }
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
classes:
  - name: com.example.app.MainActivity
    superclass: android.app.Activity
    modifiers: [public]
    methods:
      - name: onCreate
        params: [android.os.Bundle]
        modifiers: [public]
        body:
          - "x = 1"
          - "return"
      - name: helper
        returns: int
        modifiers: [public, static]
        body:
          - "return 0"
"#;

    #[test]
    fn build_from_yaml() {
        let doc: ProgramDoc = serde_yaml::from_str(SAMPLE).unwrap();
        let classes = doc.build();
        assert_eq!(classes.len(), 1);

        let class = &classes[0];
        assert_eq!(class.short_name(), "MainActivity");

        let on_create = class.method_by_name("onCreate").unwrap();
        let body = on_create.body.as_ref().unwrap();
        assert!(matches!(body.units[0], Unit::BindThis { .. }));
        assert!(matches!(body.units[1], Unit::BindParam { index: 0, .. }));
        assert_eq!(body.splice_point(), 2);
        assert!(matches!(body.units[3], Unit::Return(None)));
        body.validate().unwrap();

        // Static method: no this binding.
        let helper = class.method_by_name("helper").unwrap();
        let helper_body = helper.body.as_ref().unwrap();
        assert!(helper_body.this_ty.is_none());
        assert_eq!(helper_body.splice_point(), 0);
    }

    #[test]
    fn render_round_trip() {
        let doc: ProgramDoc = serde_yaml::from_str(SAMPLE).unwrap();
        let classes = doc.build();
        let rendered = ProgramDoc::from_classes(&classes);
        let lines = rendered.classes[0].methods[0].body.as_ref().unwrap();
        assert_eq!(lines[0], "this := @this");
        assert_eq!(lines[1], "$p0 := @parameter0");
        assert_eq!(lines[2], "x = 1");
        assert_eq!(lines[3], "return");
    }
}
