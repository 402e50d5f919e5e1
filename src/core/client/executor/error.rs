use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Failed to reach executor endpoint: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Executor rejected job: status {status}, body: {body}")]
    ExecutionRejected { status: u16, body: String },

    #[error("Executor returned an unparsable response: {0}")]
    InvalidResponse(String),
}
