use thiserror::Error;

/// Common errors for every `UserApi` implementation
#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl UserError {
    /// Text suitable for showing next to a form.
    ///
    /// For server failures this is the error body as the server sent it,
    /// without the status prefix. 4xx and 5xx are treated the same.
    pub fn display_message(&self) -> String {
        match self {
            UserError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            UserError::Api { status, .. } => Some(*status),
            UserError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, UserError>;
