use std::collections::HashSet;

use jweave_ir::{Instruction, InstructionBatch, Operand, Temp, Type};

use crate::error::{Error, Result};

/// One unit of a method body.
#[derive(Debug, Clone)]
pub enum Unit {
    /// Binding prologue: `local := @this`.
    BindThis { local: String },
    /// Binding prologue: `local := @parameterN`.
    BindParam { local: String, index: usize },
    /// A modeled instruction. Jump targets are absolute unit indices.
    Inst(Instruction),
    /// `return` / `return op`.
    Return(Option<Operand>),
    /// Carried-over source text the model does not interpret.
    Raw(String),
}

impl Unit {
    fn is_binding(&self) -> bool {
        matches!(self, Unit::BindThis { .. } | Unit::BindParam { .. })
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::BindThis { local } => write!(f, "{local} := @this"),
            Unit::BindParam { local, index } => write!(f, "{local} := @parameter{index}"),
            Unit::Inst(insn) => write!(f, "{insn}"),
            Unit::Return(None) => f.write_str("return"),
            Unit::Return(Some(op)) => write!(f, "return {op}"),
            Unit::Raw(text) => f.write_str(text),
        }
    }
}

/// A method body: declared locals plus an ordered unit list.
///
/// Bodies start with a binding prologue (`this`, then parameters); splicing
/// keeps that prologue ahead of anything inserted.
#[derive(Debug, Clone, Default)]
pub struct MethodBody {
    /// `Some` for instance methods.
    pub this_ty: Option<Type>,
    pub locals: Vec<Temp>,
    pub units: Vec<Unit>,
}

impl MethodBody {
    pub fn new(this_ty: Option<Type>) -> MethodBody {
        MethodBody {
            this_ty,
            locals: Vec::new(),
            units: Vec::new(),
        }
    }

    /// The method's `this` reference, for instance methods.
    pub fn this_operand(&self) -> Option<Operand> {
        self.this_ty.clone().map(|ty| Operand::This { ty })
    }

    pub fn declare_local(&mut self, temp: Temp) {
        self.locals.push(temp);
    }

    pub fn local_names(&self) -> impl Iterator<Item = &str> {
        self.locals.iter().map(|t| t.name.as_str())
    }

    /// Index of the first unit that is not part of the binding prologue.
    pub fn splice_point(&self) -> usize {
        self.units
            .iter()
            .position(|u| !u.is_binding())
            .unwrap_or(self.units.len())
    }

    /// Insert a batch immediately before the first substantive unit.
    ///
    /// Batch-relative jump targets are rebased to absolute unit indices, the
    /// batch's temps are declared as locals, and any pre-existing jumps past
    /// the splice point are shifted.
    pub fn splice(&mut self, batch: InstructionBatch) {
        let at = self.splice_point();
        let count = batch.len();

        for unit in &mut self.units {
            if let Unit::Inst(insn) = unit
                && let Some(target) = insn.jump_target_mut()
                && *target >= at
            {
                *target += count;
            }
        }

        let mut inserted = Vec::with_capacity(count);
        for mut insn in batch.instructions {
            if let Some(temp) = insn.defined_temp()
                && !self.locals.iter().any(|l| l.name == temp.name)
            {
                self.locals.push(temp.clone());
            }
            if let Some(target) = insn.jump_target_mut() {
                *target += at;
            }
            inserted.push(Unit::Inst(insn));
        }
        self.units.splice(at..at, inserted);
    }

    /// Structural validation.
    ///
    /// Checks that local names are unique, that every temp operand of a
    /// modeled instruction is a declared local defined by an earlier unit,
    /// and that jump targets land on a substantive unit inside the body.
    /// `Raw` units define nothing and are not inspected.
    pub fn validate(&self) -> Result<()> {
        let mut declared = HashSet::new();
        for local in &self.locals {
            if !declared.insert(local.name.as_str()) {
                return Err(Error::InvalidBody(format!(
                    "duplicate local '{}'",
                    local.name
                )));
            }
        }

        let mut defined = HashSet::new();
        for (index, unit) in self.units.iter().enumerate() {
            match unit {
                Unit::BindThis { local } | Unit::BindParam { local, .. } => {
                    if !declared.contains(local.as_str()) {
                        return Err(Error::InvalidBody(format!(
                            "binding for undeclared local '{local}'"
                        )));
                    }
                    defined.insert(local.as_str());
                }
                Unit::Inst(insn) => {
                    for op in insn.uses() {
                        self.check_operand(op, &declared, &defined)?;
                    }
                    if let Some(target) = insn.jump_target() {
                        if target >= self.units.len() {
                            return Err(Error::InvalidBody(format!(
                                "jump at unit {index} targets {target}, past the body"
                            )));
                        }
                        if self.units[target].is_binding() {
                            return Err(Error::InvalidBody(format!(
                                "jump at unit {index} targets the binding prologue"
                            )));
                        }
                    }
                    if let Some(temp) = insn.defined_temp() {
                        if !declared.contains(temp.name.as_str()) {
                            return Err(Error::InvalidBody(format!(
                                "assignment to undeclared local '{}'",
                                temp.name
                            )));
                        }
                        defined.insert(temp.name.as_str());
                    }
                }
                Unit::Return(Some(op)) => {
                    self.check_operand(op, &declared, &defined)?;
                }
                Unit::Return(None) | Unit::Raw(_) => {}
            }
        }
        Ok(())
    }

    fn check_operand(
        &self,
        op: &Operand,
        declared: &HashSet<&str>,
        defined: &HashSet<&str>,
    ) -> Result<()> {
        match op {
            Operand::Temp(temp) => {
                if !declared.contains(temp.name.as_str()) {
                    return Err(Error::InvalidBody(format!(
                        "use of undeclared local '{}'",
                        temp.name
                    )));
                }
                if !defined.contains(temp.name.as_str()) {
                    return Err(Error::InvalidBody(format!(
                        "use of '{}' before definition",
                        temp.name
                    )));
                }
            }
            Operand::This { .. } => {
                if self.this_ty.is_none() {
                    return Err(Error::InvalidBody(
                        "@this reference in a static method".to_string(),
                    ));
                }
            }
            Operand::StringLit(_)
            | Operand::NullConst
            | Operand::Param { .. }
            | Operand::StaticField(_) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jweave_ir::{FieldRef, InvokeExpr, MethodRef};

    fn print_stream_field() -> FieldRef {
        FieldRef {
            class: "java.lang.System".to_string(),
            name: "out".to_string(),
            ty: Type::parse("java.io.PrintStream"),
        }
    }

    fn println_ref() -> MethodRef {
        MethodRef {
            class: "java.io.PrintStream".to_string(),
            name: "println".to_string(),
            params: vec![Type::String],
            ret: Type::Void,
        }
    }

    fn instance_body() -> MethodBody {
        let this_ty = Type::parse("com.example.app.MainActivity");
        let mut body = MethodBody::new(Some(this_ty.clone()));
        body.declare_local(Temp::new("this", this_ty));
        body.units.push(Unit::BindThis {
            local: "this".to_string(),
        });
        body.units.push(Unit::Raw("x = 1".to_string()));
        body.units.push(Unit::Return(None));
        body
    }

    fn print_batch() -> InstructionBatch {
        let stream = Temp::new("$w0", Type::parse("java.io.PrintStream"));
        let mut batch = InstructionBatch::new();
        batch.push(Instruction::LoadStaticField {
            dest: stream.clone(),
            field: print_stream_field(),
        });
        batch.push(Instruction::Invoke(InvokeExpr::virtual_call(
            Operand::Temp(stream),
            println_ref(),
            vec![Operand::StringLit("hi".to_string())],
        )));
        batch
    }

    #[test]
    fn splice_lands_after_prologue() {
        let mut body = instance_body();
        body.splice(print_batch());

        assert!(matches!(body.units[0], Unit::BindThis { .. }));
        assert!(matches!(body.units[1], Unit::Inst(_)));
        assert!(matches!(body.units[2], Unit::Inst(_)));
        assert!(matches!(body.units[3], Unit::Raw(_)));
        assert!(body.local_names().any(|n| n == "$w0"));
        body.validate().unwrap();
    }

    #[test]
    fn splice_rebases_jump_targets() {
        let mut body = instance_body();
        let mut batch = print_batch();
        // Guard jumping to the print: batch-relative target 2.
        batch.instructions.insert(
            1,
            Instruction::IfNullJump {
                value: Operand::This {
                    ty: Type::parse("com.example.app.MainActivity"),
                },
                target: 2,
            },
        );
        body.splice(batch);

        let Unit::Inst(guard) = &body.units[2] else {
            panic!("expected guard at unit 2");
        };
        assert_eq!(guard.jump_target(), Some(3));
        body.validate().unwrap();
    }

    #[test]
    fn validate_rejects_use_before_def() {
        let mut body = instance_body();
        let ghost = Temp::new("$w9", Type::parse("java.io.PrintStream"));
        body.declare_local(ghost.clone());
        body.units.insert(
            1,
            Unit::Inst(Instruction::Invoke(InvokeExpr::virtual_call(
                Operand::Temp(ghost),
                println_ref(),
                vec![Operand::StringLit("x".to_string())],
            ))),
        );
        assert!(matches!(body.validate(), Err(Error::InvalidBody(_))));
    }

    #[test]
    fn validate_rejects_dangling_jump() {
        let mut body = instance_body();
        body.units.insert(
            1,
            Unit::Inst(Instruction::IfNullJump {
                value: Operand::NullConst,
                target: 99,
            }),
        );
        assert!(matches!(body.validate(), Err(Error::InvalidBody(_))));
    }
}
