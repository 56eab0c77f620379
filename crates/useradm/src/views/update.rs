use tracing::{info, warn};
use user_core::{UserApi, UserError};

use super::{SubmitOutcome, UserForm};
use crate::router::Route;

/// Form for editing an existing user
#[derive(Debug)]
pub struct UpdateView {
    /// ID taken from the route; submit always uses this, never a form value
    user_id: i64,
    pub form: UserForm,
    error_message: Option<String>,
}

impl UpdateView {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            form: UserForm::new(),
            error_message: None,
        }
    }

    /// Build the view for `Route::UpdateUser`
    pub fn for_route(route: Route) -> Option<Self> {
        match route {
            Route::UpdateUser(id) => Some(Self::new(id)),
            _ => None,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Fetch the user and pre-fill the form from the response.
    ///
    /// Fields missing from the response keep their current form value.
    pub fn activate(&mut self, api: &dyn UserApi) -> Result<(), UserError> {
        match api.get_user_fields(self.user_id) {
            Ok(patch) => {
                self.form.patch(&patch);
                Ok(())
            }
            Err(e) => {
                warn!(user_id = self.user_id, error = %e, "failed to load user");
                self.error_message = Some(e.display_message());
                Err(e)
            }
        }
    }

    /// Send the form if it is valid. An invalid form is not submitted.
    pub fn submit(&mut self, api: &dyn UserApi) -> SubmitOutcome {
        let payload = match self.form.payload() {
            Ok(payload) => payload,
            Err(violations) => return SubmitOutcome::Ignored(violations),
        };

        match api.update_user(self.user_id, &payload) {
            Ok(user) => {
                self.error_message = None;
                info!(user_id = self.user_id, "updated user, navigating to {}", Route::Users);
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
