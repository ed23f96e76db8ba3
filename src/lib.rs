//! Terminal front end for appointment and organization management.
//!
//! Every panel of the interface is shown or hidden through one shared
//! [`navigation::Navigator`], which enforces that at most one top-level
//! overlay is active and notifies its subscribers on every write.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod feedback;
pub mod logger;
pub mod navigation;
pub mod state;
pub mod ui;
