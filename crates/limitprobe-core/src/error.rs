use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("login failed: status={status} body={body}")]
    LoginFailed { status: u16, body: String },

    #[error("login response has no usable 'token' field")]
    TokenMissing,

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
