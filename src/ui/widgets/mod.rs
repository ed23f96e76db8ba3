//! Reusable UI widget components.
//!
//! This module contains the styling utilities shared by every view.

pub mod styling;
