use std::time::Duration;

/// Connection settings for [`crate::UserApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Root under which `/users` lives, e.g. `http://localhost:8080`
    pub base_url: String,
    /// Overall request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
