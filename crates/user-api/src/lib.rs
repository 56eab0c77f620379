pub mod client;
pub mod config;
pub mod error;
mod trait_impl;


pub use client::UserApiClient;
pub use config::ApiConfig;
pub use error::{ApiError, Result};

pub use user_core::{UserApi, UserError};
