use std::fmt;

/// Client-side locations a view can send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The user table
    Users,
    CreateUser,
    UpdateUser(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Users => "/users".to_string(),
            Route::CreateUser => "/users/create".to_string(),
            Route::UpdateUser(id) => format!("/users/update/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
