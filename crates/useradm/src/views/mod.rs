//! Screen-level state machines.
//!
//! Each view owns its own state and talks to the server only through
//! [`user_core::UserApi`], so tests can drive them with the mock client.

mod create;
mod delete;
mod form;
mod list;
mod update;

pub use create::CreateView;
pub use delete::{is_confirmed, DeleteView};
pub use form::UserForm;
pub use list::{ListState, ListView, UserRow, COLUMNS};
pub use update::UpdateView;

use crate::router::Route;
use user_core::{User, Violations};

/// Result of submitting a create or update form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was invalid; nothing was sent
    Ignored(Violations),
    /// The server accepted the form; go to `next`
    Saved { user: User, next: Route },
    /// The server rejected the request; see the view's `error_message`
    Failed,
}
