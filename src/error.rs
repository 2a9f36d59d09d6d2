use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrandError {
    #[error("Storage is not formatted: volume tag not found")]
    Unformatted,

    #[error("Unsupported format version: storage reports {found}")]
    WrongVersion { found: u16 },

    #[error("Address range violation: access outside the storage region")]
    OutOfRange,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("File already exists: {0}")]
    FileAlreadyExists(String),

    #[error("Out of space: region cannot hold the record")]
    InsufficientSpace,

    #[error("Buffer size mismatch: file holds {expected} bytes, buffer holds {actual}")]
    BufferSizeMismatch { expected: u16, actual: usize },

    #[error("Internal error: record scan ended without a decision")]
    Undefined,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StrandError>;
