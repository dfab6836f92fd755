//! Typed register-IR building blocks for method instrumentation.
//!
//! The instrumentation engine synthesizes sequences of these instructions and
//! splices them into method bodies. Everything here is a closed tagged union;
//! the engine dispatches on operand and type shape exhaustively.

pub mod batch;
pub mod instruction;
pub mod operand;
pub mod refs;
pub mod ty;

pub use batch::InstructionBatch;
pub use instruction::{Instruction, InvokeExpr, InvokeKind};
pub use operand::{Operand, Temp};
pub use refs::{FieldRef, MethodRef};
pub use ty::{PrimKind, Type};
