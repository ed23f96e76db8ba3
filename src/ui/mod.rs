//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library, including:
//! - Page layout (title bar, records blocks, notices, footer and log)
//! - The panel drawn on top of the page
//! - Theme management and styling helpers

type Frame<'a> = ratatui::Frame<'a>;

mod render;
mod theme;
mod widgets;

pub use render::render;
pub use theme::{ColorSpec, Theme};
