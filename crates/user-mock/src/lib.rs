//! Mock client for the user admin CLI
//!
//! [`MockClient`] implements `UserApi` over an in-memory store instead of
//! making HTTP requests. It records every call so tests can assert on the
//! exact sequence of requests a view issued, and it can be told to fail the
//! next call of a given kind.
//!
//! # Usage
//!
//! Set the `USERADM_MOCK_FILE` environment variable to a JSON array of users
//! to run the CLI against that data:
//!
//! ```bash
//! USERADM_MOCK_FILE=./fixtures/users.json useradm list
//! ```

mod client;
mod fixture;

pub use client::{CallLogEntry, Method, MockClient};
pub use fixture::{load_fixture, FixtureError};

/// Environment variable to enable mock mode
pub const MOCK_FILE_ENV: &str = "USERADM_MOCK_FILE";

/// Get the mock fixture path from environment, if set
pub fn get_mock_file() -> Option<std::path::PathBuf> {
    std::env::var(MOCK_FILE_ENV)
        .ok()
        .map(std::path::PathBuf::from)
}
