use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown class '{0}'")]
    UnresolvedClass(String),

    #[error("no method '{1}' in class '{0}'")]
    UnresolvedMethod(String, String),

    #[error("no field '{1}' in class '{0}'")]
    UnresolvedField(String, String),

    #[error("invalid method body: {0}")]
    InvalidBody(String),
}

pub type Result<T> = std::result::Result<T, Error>;
