use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Coins Error: {0}")]
    Coins(String),
    #[error("Overflow Error")]
    Overflow,
    #[error("Divide by Zero Error")]
    DivideByZero,
    #[error("Unknown Error")]
    Unknown,
}

/// A result type bound to the standard stakedist error type.
pub type Result<T> = std::result::Result<T, Error>;
