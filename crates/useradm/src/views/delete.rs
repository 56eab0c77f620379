use user_core::{UserApi, UserError};

use super::ListView;

/// Delete affordance for one row of the user table
#[derive(Debug, Clone, Copy)]
pub struct DeleteView {
    user_id: i64,
}

impl DeleteView {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn prompt(&self) -> String {
        format!("Delete user {}? [y/N] ", self.user_id)
    }

    /// Delete through the list so the table is refreshed afterwards
    pub fn confirm(&self, api: &dyn UserApi, list: &mut ListView) -> Result<(), UserError> {
        list.delete(api, self.user_id)
    }
}

/// Interpret a confirmation answer; anything but yes declines
pub fn is_confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use user_core::{User, UserStatus};
    use user_mock::{Method, MockClient};

    #[test]
    fn confirm_deletes_then_lists() {
        let api = MockClient::new(vec![User {
            user_id: 100,
            user_name: "testuser1".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "testuser1@example.com".to_string(),
            user_status: UserStatus::Active,
            department: "Engineering".to_string(),
        }]);
        let mut list = ListView::new();

        DeleteView::new(100).confirm(&api, &mut list).unwrap();

        assert_eq!(api.methods(), vec![Method::Delete, Method::List]);
        assert!(list.rows().is_empty());
    }

    #[test]
    fn answers() {
        assert!(is_confirmed("y"));
        assert!(is_confirmed("YES\n"));
        assert!(!is_confirmed(""));
        assert!(!is_confirmed("n"));
        assert!(!is_confirmed("yep"));
    }

    #[test]
    fn prompt_names_the_user() {
        assert_eq!(DeleteView::new(9).prompt(), "Delete user 9? [y/N] ");
    }
}
