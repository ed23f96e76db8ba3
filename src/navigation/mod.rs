//! Navigation coordinator module.
//!
//! This module owns the shared visibility state of the application:
//! - `Overlay` register for the top-level overlays (at most one active)
//! - Title bar and records sub-view state
//! - `Navigator`, the coordinator every component issues transitions through

mod navigator;
mod overlay;
mod state;

pub use navigator::{Command, FlagWatch, Navigator};
pub use overlay::{Flag, Overlay, RecordsView, TitleBar};
pub use state::{PanelState, SelectedUser};
