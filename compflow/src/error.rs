//! Result and errors.
use std::{fmt, io};

pub type FlowResult<T> = std::result::Result<T, FlowError>;

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// Writing the exported figure failed.
    #[error("export failed: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Fmt(#[from] fmt::Error),
}
