use crate::operand::{Operand, Temp};
use crate::refs::{FieldRef, MethodRef};

/// Call dispatch kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeKind {
    Virtual,
    Interface,
    /// Constructor / direct dispatch.
    Special,
    Static,
}

impl std::fmt::Display for InvokeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InvokeKind::Virtual => "virtualinvoke",
            InvokeKind::Interface => "interfaceinvoke",
            InvokeKind::Special => "specialinvoke",
            InvokeKind::Static => "staticinvoke",
        };
        f.write_str(s)
    }
}

/// A call expression. `receiver` is `None` exactly for static calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeExpr {
    pub kind: InvokeKind,
    pub method: MethodRef,
    pub receiver: Option<Operand>,
    pub args: Vec<Operand>,
}

impl InvokeExpr {
    pub fn virtual_call(receiver: Operand, method: MethodRef, args: Vec<Operand>) -> InvokeExpr {
        InvokeExpr {
            kind: InvokeKind::Virtual,
            method,
            receiver: Some(receiver),
            args,
        }
    }

    pub fn interface_call(receiver: Operand, method: MethodRef, args: Vec<Operand>) -> InvokeExpr {
        InvokeExpr {
            kind: InvokeKind::Interface,
            method,
            receiver: Some(receiver),
            args,
        }
    }

    pub fn special_call(receiver: Operand, method: MethodRef, args: Vec<Operand>) -> InvokeExpr {
        InvokeExpr {
            kind: InvokeKind::Special,
            method,
            receiver: Some(receiver),
            args,
        }
    }

    pub fn static_call(method: MethodRef, args: Vec<Operand>) -> InvokeExpr {
        InvokeExpr {
            kind: InvokeKind::Static,
            method,
            receiver: None,
            args,
        }
    }
}

impl std::fmt::Display for InvokeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let args: Vec<String> = self.args.iter().map(Operand::to_string).collect();
        match &self.receiver {
            Some(recv) => write!(f, "{} {}.{}({})", self.kind, recv, self.method, args.join(", ")),
            None => write!(f, "{} {}({})", self.kind, self.method, args.join(", ")),
        }
    }
}

/// One synthesized low-level operation.
///
/// Instructions are produced in execution order and spliced verbatim.
/// `IfNullJump` targets are indices relative to the start of the containing
/// sequence; splicing rebases them to absolute unit positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `dest = <Class: ty field>`
    LoadStaticField { dest: Temp, field: FieldRef },
    /// `dest = new Class`
    NewObject { dest: Temp, class: String },
    /// Call whose result is discarded (constructor calls, println).
    Invoke(InvokeExpr),
    /// `dest = call(...)`
    AssignInvoke { dest: Temp, call: InvokeExpr },
    /// `if value == null goto target`
    IfNullJump { value: Operand, target: usize },
}

impl Instruction {
    /// The temp this instruction defines, if any.
    pub fn defined_temp(&self) -> Option<&Temp> {
        match self {
            Instruction::LoadStaticField { dest, .. }
            | Instruction::NewObject { dest, .. }
            | Instruction::AssignInvoke { dest, .. } => Some(dest),
            Instruction::Invoke(_) | Instruction::IfNullJump { .. } => None,
        }
    }

    /// Operands this instruction reads.
    pub fn uses(&self) -> Vec<&Operand> {
        match self {
            Instruction::LoadStaticField { .. } | Instruction::NewObject { .. } => vec![],
            Instruction::Invoke(call) | Instruction::AssignInvoke { call, .. } => {
                call.receiver.iter().chain(call.args.iter()).collect()
            }
            Instruction::IfNullJump { value, .. } => vec![value],
        }
    }

    pub fn jump_target(&self) -> Option<usize> {
        match self {
            Instruction::IfNullJump { target, .. } => Some(*target),
            _ => None,
        }
    }

    pub fn jump_target_mut(&mut self) -> Option<&mut usize> {
        match self {
            Instruction::IfNullJump { target, .. } => Some(target),
            _ => None,
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::LoadStaticField { dest, field } => write!(f, "{dest} = {field}"),
            Instruction::NewObject { dest, class } => write!(f, "{dest} = new {class}"),
            Instruction::Invoke(call) => write!(f, "{call}"),
            Instruction::AssignInvoke { dest, call } => write!(f, "{dest} = {call}"),
            Instruction::IfNullJump { value, target } => {
                write!(f, "if {value} == null goto [{target}]")
            }
        }
    }
}
