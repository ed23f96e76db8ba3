//! Application state management module.
//!
//! This module contains the state of the terminal front end, including:
//! - Main `State` struct that holds the interface data around the coordinator
//! - Form editing types (Form, FormKind, FormRequest)
//! - State error handling

mod error;
mod form;
mod state_impl;

pub use error::StateError;
pub use form::{Form, FormField, FormKind, FormRequest};
pub use state_impl::State;
