use thiserror::Error;

/// Errors surfaced by the file and command line layers.
///
/// Executing and disassembling never fail; their outcomes are
/// `ExecutionResult` values.
#[derive(Error, Debug)]
pub enum CesarError {
    /// Memory image file is not header + 64 KiB.
    #[error("invalid memory image size: expected {expected} bytes, got {actual}")]
    InvalidImageSize { expected: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CesarError>;
