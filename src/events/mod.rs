//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: booking API interactions
//! - Terminal events: user input and terminal interactions
//! - Panel scopes: cancellation of requests issued by a panel

pub mod network;
pub mod scope;
pub mod terminal;

pub use scope::{Panel, PanelScope, PanelScopes};
