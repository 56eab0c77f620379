//! Command-line admin client for a users REST API.
//!
//! The binary wires these modules together; they live in a library so the
//! views can be driven directly from tests.

pub mod cli;
pub mod color;
pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
pub mod router;
pub mod views;
