use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The operand shape has no string conversion. Fatal for the probe.
    #[error("operand {operand} of type {ty} cannot be stringified")]
    UnsupportedOperand { operand: String, ty: String },

    /// Symbol resolution or body validation failure. Fatal for the probe.
    #[error(transparent)]
    Symbol(#[from] jweave_model::Error),

    /// No host accessor in the ancestor chain. Recoverable: the fragment
    /// probe degrades to its base message.
    #[error("no '{accessor}' accessor in the ancestors of '{class}'")]
    MissingAccessor { class: String, accessor: String },
}

pub type Result<T> = std::result::Result<T, Error>;
