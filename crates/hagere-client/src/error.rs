//! error types for backend access

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(String),

    #[error("backend returned {code}: {detail}")]
    Status { code: u16, detail: String },

    #[error("decode error: {0}")]
    Decode(String),

    /// token rejected; the session has been cleared
    #[error("unauthorized")]
    Unauthorized,

    /// the server answered but the approval did not take effect
    #[error("not approved: {0}")]
    NotApproved(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Http(e.to_string())
    }
}
