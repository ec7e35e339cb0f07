use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SignalError {
    /// A window or threshold is outside its valid range
    #[error("invalid signal configuration: {0}")]
    InvalidConfig(String),
}
