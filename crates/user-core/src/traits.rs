use crate::error::Result;
use crate::models::{User, UserPatch, UserPayload};

/// Access to the `/users` REST resource
///
/// Every operation completes with exactly one value or one error. There is
/// no retry and no caching; callers re-fetch whenever they need fresh data.
pub trait UserApi: Send + Sync {
    /// `GET /users`
    fn list_users(&self) -> Result<Vec<User>>;

    /// `GET /users/{id}`
    fn get_user(&self, id: i64) -> Result<User>;

    /// `GET /users/{id}` decoded field by field; absent fields are `None`
    fn get_user_fields(&self, id: i64) -> Result<UserPatch>;

    /// `POST /users`; the server assigns `user_id`
    fn create_user(&self, user: &UserPayload) -> Result<User>;

    /// `PUT /users/{id}`; replaces every editable field
    fn update_user(&self, id: i64, user: &UserPayload) -> Result<User>;

    /// `DELETE /users/{id}`
    fn delete_user(&self, id: i64) -> Result<()>;

    /// Root URL the requests are sent to, for display
    fn base_url(&self) -> &str;
}
