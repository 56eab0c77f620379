use tracing::info;
use user_core::UserApi;

use super::{SubmitOutcome, UserForm};
use crate::router::Route;

/// Form for a new user
#[derive(Debug, Default)]
pub struct CreateView {
    pub form: UserForm,
    error_message: Option<String>,
}

impl CreateView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Server error from the last submit, if it failed
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Send the form if it is valid. An invalid form is not submitted.
    pub fn submit(&mut self, api: &dyn UserApi) -> SubmitOutcome {
        let payload = match self.form.payload() {
            Ok(payload) => payload,
            Err(violations) => return SubmitOutcome::Ignored(violations),
        };

        match api.create_user(&payload) {
            Ok(user) => {
                self.error_message = None;
                info!(user_id = user.user_id, "created user, navigating to {}", Route::Users);
                SubmitOutcome::Saved {
                    user,
                    next: Route::Users,
                }
            }
            Err(e) => {
                self.error_message = Some(e.display_message());
                SubmitOutcome::Failed
            }
        }
    }
}
