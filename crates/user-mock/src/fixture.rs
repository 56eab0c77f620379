use std::path::Path;
use thiserror::Error;
use user_core::User;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse fixture {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Load a JSON array of users
pub fn load_fixture(path: impl AsRef<Path>) -> Result<Vec<User>, FixtureError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| FixtureError::Parse {
        path: path.display().to_string(),
        source,
    })
}
