use thiserror::Error;
use user_core::UserError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl From<ApiError> for UserError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http(e) => UserError::Http(e.to_string()),
            ApiError::Parse(e) => UserError::Parse(e.to_string()),
            ApiError::Io(e) => UserError::Io(e.to_string()),
            ApiError::Api { status, message } => UserError::Api { status, message },
        }
    }
}
