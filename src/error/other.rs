use color_eyre::eyre::{eyre, Report};
use thiserror::Error;

/// Wrapper around a contextual report for errors that do not fit a more
/// specific component variant.
#[derive(Debug, Error)]
#[error("{0:#}")]
pub struct OtherError(Report);

impl From<Report> for OtherError {
    fn from(value: Report) -> Self {
        Self(value)
    }
}

impl From<String> for OtherError {
    fn from(value: String) -> Self {
        Self(eyre!(value))
    }
}

impl From<&str> for OtherError {
    fn from(value: &str) -> Self {
        Self(eyre!(value.to_string()))
    }
}
