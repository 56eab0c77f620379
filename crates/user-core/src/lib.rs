pub mod error;
pub mod models;
pub mod traits;
pub mod validation;

pub use error::{Result, UserError};
pub use models::*;
pub use traits::UserApi;
pub use validation::{validate_fields, Field, Rule, Violation, Violations};
