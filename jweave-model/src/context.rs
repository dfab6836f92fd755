use std::collections::BTreeMap;

use jweave_ir::{FieldRef, MethodRef, Type};

use crate::class::ClassModel;
use crate::error::{Error, Result};
use crate::runtime;

/// The per-run symbol table: class declarations keyed by name.
///
/// Built once before a pass and then only read. There is no process-global
/// state; every component takes the context by reference.
#[derive(Debug, Default)]
pub struct AnalysisContext {
    classes: BTreeMap<String, ClassModel>,
}

impl AnalysisContext {
    pub fn new() -> AnalysisContext {
        AnalysisContext::default()
    }

    /// An empty context pre-seeded with the runtime declarations every
    /// probe references.
    pub fn with_runtime() -> AnalysisContext {
        let mut ctx = AnalysisContext::new();
        runtime::install(&mut ctx);
        ctx
    }

    /// Declare a class. A later declaration with the same name wins.
    pub fn declare(&mut self, class: ClassModel) {
        self.classes.insert(class.name.clone(), class);
    }

    /// Declare the signatures of every class in a program, without bodies.
    pub fn declare_all<'a>(&mut self, classes: impl IntoIterator<Item = &'a ClassModel>) {
        for class in classes {
            let mut stripped = class.clone();
            for method in &mut stripped.methods {
                method.body = None;
            }
            self.declare(stripped);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn class(&self, name: &str) -> Result<&ClassModel> {
        self.classes
            .get(name)
            .ok_or_else(|| Error::UnresolvedClass(name.to_string()))
    }

    /// The superclass chain of `name`, nearest first, excluding `name`
    /// itself. Stops at the first link that is not declared.
    pub fn ancestors<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a ClassModel> {
        let first = self
            .classes
            .get(name)
            .and_then(|c| c.superclass.as_deref())
            .and_then(|s| self.classes.get(s));
        std::iter::successors(first, move |current| {
            current
                .superclass
                .as_deref()
                .and_then(|s| self.classes.get(s))
        })
    }

    /// Resolve a method by exact signature in the named class.
    pub fn method_ref(&self, class: &str, name: &str, params: &[Type]) -> Result<MethodRef> {
        let declared = self.class(class)?;
        declared
            .method(name, params)
            .map(|m| m.as_ref(class))
            .ok_or_else(|| Error::UnresolvedMethod(class.to_string(), name.to_string()))
    }

    /// Resolve the first method with the given name in the named class.
    pub fn method_ref_by_name(&self, class: &str, name: &str) -> Result<MethodRef> {
        let declared = self.class(class)?;
        declared
            .method_by_name(name)
            .map(|m| m.as_ref(class))
            .ok_or_else(|| Error::UnresolvedMethod(class.to_string(), name.to_string()))
    }

    pub fn field_ref(&self, class: &str, name: &str) -> Result<FieldRef> {
        let declared = self.class(class)?;
        declared
            .field(name)
            .map(|f| FieldRef {
                class: class.to_string(),
                name: f.name.clone(),
                ty: f.ty.clone(),
            })
            .ok_or_else(|| Error::UnresolvedField(class.to_string(), name.to_string()))
    }
}
