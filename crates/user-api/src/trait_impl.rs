use user_core::{Result, User, UserApi, UserPatch, UserPayload};

use crate::client::UserApiClient;

impl UserApi for UserApiClient {
    fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.list_users()?)
    }

    fn get_user(&self, id: i64) -> Result<User> {
        Ok(self.get_user(id)?)
    }

    fn get_user_fields(&self, id: i64) -> Result<UserPatch> {
        Ok(self.get_user_fields(id)?)
    }

    fn create_user(&self, user: &UserPayload) -> Result<User> {
        Ok(self.create_user(user)?)
    }

    fn update_user(&self, id: i64, user: &UserPayload) -> Result<User> {
        Ok(self.update_user(id, user)?)
    }

    fn delete_user(&self, id: i64) -> Result<()> {
        Ok(self.delete_user(id)?)
    }

    fn base_url(&self) -> &str {
        self.base_url()
    }
}
