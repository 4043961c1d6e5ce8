use std::{io, result};
use std::sync::Arc;
use thiserror::Error;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Error, Clone)]
pub enum Error {
    #[error("IO error: {0}")]
    // arc is necessary, so that error class is cloneable.
    Io(Arc<io::Error>),

    #[error("illegal state {0}")]
    IllegalState(String),

    // one entry per failed leaf, in input order
    #[error("failed to close {} iterator(s): {}", .0.len(), join_errors(.0))]
    Close(Vec<Error>),

    #[error("logger init error: {0}")]
    Logger(String),
}

fn join_errors(errors: &[Error]) -> String {
    errors.iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::Io(Arc::new(value))
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(value: log::SetLoggerError) -> Self {
        Error::Logger(value.to_string())
    }
}
