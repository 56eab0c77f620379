use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use user_core::{User, UserPatch, UserPayload};

/// REST client for the `/users` resource
pub struct UserApiClient {
    agent: Agent,
    base_url: String,
}

impl UserApiClient {
    /// Create a client from an explicit configuration.
    ///
    /// A trailing `/` on the base URL is ignored.
    pub fn new(config: &ApiConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(config.timeout)
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, id: i64) -> String {
        format!("{}/users/{}", self.base_url, id)
    }

    /// Check response status and return error if not successful
    fn check_response(
        &self,
        mut response: ureq::http::Response<ureq::Body>,
    ) -> Result<ureq::http::Response<ureq::Body>> {
        let status = response.status().as_u16();

        if (200..300).contains(&status) {
            return Ok(response);
        }

        let body = response
            .body_mut()
            .read_to_string()
            .unwrap_or_else(|_| String::new());

        let message = error_message(status, body);
        debug!(status, %message, "request failed");

        Err(ApiError::Api { status, message })
    }

    /// Handle transport-level errors
    fn handle_error(&self, err: ureq::Error) -> ApiError {
        debug!(error = %err, "transport error");
        ApiError::Http(err)
    }

    /// List every user
    pub fn list_users(&self) -> Result<Vec<User>> {
        let url = self.users_url();
        debug!(method = "GET", %url);

        let response = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .call()
            .map_err(|e| self.handle_error(e))?;

        // An empty table is sent as `null`
        let users: Option<Vec<User>> = read_body(self.check_response(response)?)?;
        let users = users.unwrap_or_default();
        debug!(count = users.len(), "fetched users");
        Ok(users)
    }

    fn fetch_user<T: DeserializeOwned>(&self, id: i64) -> Result<T> {
        let url = self.user_url(id);
        debug!(method = "GET", %url);

        let response = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .call()
            .map_err(|e| self.handle_error(e))?;

        read_body(self.check_response(response)?)
    }

    /// Get a user by ID
    pub fn get_user(&self, id: i64) -> Result<User> {
        self.fetch_user(id)
    }

    /// Get a user by ID, keeping only the fields the server actually sent
    pub fn get_user_fields(&self, id: i64) -> Result<UserPatch> {
        self.fetch_user(id)
    }

    /// Create a user; the server assigns the ID
    pub fn create_user(&self, user: &UserPayload) -> Result<User> {
        let url = self.users_url();
        debug!(method = "POST", %url);

        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send_json(user)
            .map_err(|e| self.handle_error(e))?;

        read_body(self.check_response(response)?)
    }

    /// Replace the editable fields of an existing user
    pub fn update_user(&self, id: i64, user: &UserPayload) -> Result<User> {
        let url = self.user_url(id);
        debug!(method = "PUT", %url);

        let response = self
            .agent
            .put(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send_json(user)
            .map_err(|e| self.handle_error(e))?;

        read_body(self.check_response(response)?)
    }

    /// Delete a user. The response body is not inspected.
    pub fn delete_user(&self, id: i64) -> Result<()> {
        let url = self.user_url(id);
        debug!(method = "DELETE", %url);

        let response = self
            .agent
            .delete(&url)
            .header("Accept", "application/json")
            .call()
            .map_err(|e| self.handle_error(e))?;

        self.check_response(response)?;
        Ok(())
    }
}

/// Decode a successful response body
fn read_body<T: DeserializeOwned>(mut response: ureq::http::Response<ureq::Body>) -> Result<T> {
    let body = response.body_mut().read_to_string()?;
    Ok(serde_json::from_str(&body)?)
}

/// Extract the text to show for a failed response.
///
/// The server answers errors with a JSON string (`"username already exists"`)
/// or occasionally an object with a `message` or `error` member.
fn error_message(status: u16, body: String) -> String {
    if body.trim().is_empty() {
        return format!("HTTP {}", status);
    }

    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(serde_json::Value::String(text)) => text,
        Ok(value) => value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(|m| m.as_str())
            .map(String::from)
            .unwrap_or(body),
        Err(_) => body,
    }
}

#[cfg(test)]
mod tests {
    use super::error_message;

    #[test]
    fn json_string_body_is_unwrapped() {
        assert_eq!(
            error_message(409, "\"username already exists\"\n".to_string()),
            "username already exists"
        );
    }

    #[test]
    fn object_body_uses_message_then_error() {
        assert_eq!(
            error_message(400, r#"{"message": "bad email"}"#.to_string()),
            "bad email"
        );
        assert_eq!(
            error_message(500, r#"{"error": "db down"}"#.to_string()),
            "db down"
        );
    }

    #[test]
    fn other_bodies_pass_through() {
        assert_eq!(error_message(502, "Bad Gateway".to_string()), "Bad Gateway");
        assert_eq!(
            error_message(400, r#"{"code": 7}"#.to_string()),
            r#"{"code": 7}"#
        );
    }

    #[test]
    fn empty_body_reports_status() {
        assert_eq!(error_message(500, String::new()), "HTTP 500");
    }
}
