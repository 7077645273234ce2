use std::io;

use thiserror::Error;

/// Failure while sampling one of the kernel counter files.
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("counter read failed: {0}")]
    Io(#[from] io::Error),

    /// The counter text did not have the expected shape.
    #[error("malformed counters: {0}")]
    Format(String),
}

impl SampleError {
    pub fn format(msg: impl Into<String>) -> Self {
        SampleError::Format(msg.into())
    }

    #[cfg(test)]
    pub fn is_format(&self) -> bool {
        matches!(self, SampleError::Format(_))
    }
}
