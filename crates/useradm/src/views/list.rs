use serde::Serialize;
use tracing::{debug, warn};
use user_core::{User, UserApi, UserError};

/// Table columns, in display order
pub const COLUMNS: [&str; 7] = [
    "user_name",
    "first_name",
    "last_name",
    "email",
    "user_status",
    "department",
    "actions",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Loading,
    Loaded(Vec<User>),
    Failed(String),
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRow {
    pub user_id: i64,
    pub cells: [String; 7],
}

impl UserRow {
    fn from_user(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            cells: [
                user.user_name.clone(),
                user.first_name.clone(),
                user.last_name.clone(),
                user.email.clone(),
                user.user_status.code().to_string(),
                user.department.clone(),
                format!("update {} | delete {}", user.user_id, user.user_id),
            ],
        }
    }
}

/// The user table
#[derive(Debug)]
pub struct ListView {
    state: ListState,
    /// Last failed delete, kept while the table stays usable
    error_message: Option<String>,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    pub fn new() -> Self {
        Self {
            state: ListState::Idle,
            error_message: None,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Fetch the full collection
    pub fn activate(&mut self, api: &dyn UserApi) {
        self.state = ListState::Loading;
        self.state = match api.list_users() {
            Ok(users) => {
                debug!(count = users.len(), "loaded user list");
                ListState::Loaded(users)
            }
            Err(e) => {
                warn!(error = %e, "failed to load users");
                ListState::Failed(e.display_message())
            }
        };
    }

    /// Users from the last successful load; empty otherwise
    pub fn users(&self) -> &[User] {
        match &self.state {
            ListState::Loaded(users) => users,
            _ => &[],
        }
    }

    pub fn rows(&self) -> Vec<UserRow> {
        self.users().iter().map(UserRow::from_user).collect()
    }

    /// Delete a user, then reload the table from the server.
    ///
    /// On failure the current rows are kept and the message is recorded.
    pub fn delete(&mut self, api: &dyn UserApi, id: i64) -> Result<(), UserError> {
        match api.delete_user(id) {
            Ok(()) => {
                self.error_message = None;
                self.activate(api);
                Ok(())
            }
            Err(e) => {
                warn!(user_id = id, error = %e, "failed to delete user");
                self.error_message = Some(e.display_message());
                Err(e)
            }
        }
    }
}
