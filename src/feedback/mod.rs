//! User feedback module.
//!
//! This module contains the success/error notification surfaces and the
//! translation of API failures into notices or coordinator flag changes.

mod notice;
mod translate;

pub use notice::{Notice, Notices};
pub use translate::{report_failure, KnownFailure};
