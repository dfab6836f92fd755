//! Class, method, and body model for the instrumentation engine.
//!
//! The model is deliberately shallow: class declarations carry signatures and
//! hierarchy links for symbol resolution, and method bodies carry a binding
//! prologue plus units the engine either synthesized ([`Unit::Inst`]) or
//! carried over verbatim ([`Unit::Raw`]).

pub mod body;
pub mod class;
pub mod context;
pub mod doc;
pub mod error;
pub mod modifiers;
pub mod runtime;

pub use body::{MethodBody, Unit};
pub use class::{ClassModel, FieldModel, MethodModel};
pub use context::AnalysisContext;
pub use error::{Error, Result};
pub use modifiers::Modifiers;
