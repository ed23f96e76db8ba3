//! Translation of API failures.
//!
//! Two server messages have a dedicated recovery path in the interface and
//! are reported by flipping a coordinator flag. Every other failure becomes
//! an error notice.

use super::notice::Notices;
use crate::api::ApiError;
use crate::navigation::Navigator;
use log::*;
use regex::Regex;

/// Server failures that have their own recovery affordance.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownFailure {
    UserAlreadyExists,
    WrongPassword,
}

impl KnownFailure {
    fn pattern(&self) -> &'static str {
        match self {
            KnownFailure::UserAlreadyExists => r"(?i)\buser\s+already\s+exists\b",
            KnownFailure::WrongPassword => r"(?i)\bwrong\s+password\b",
        }
    }

    /// Recognize a server message.
    ///
    pub fn from_message(message: &str) -> Option<KnownFailure> {
        [KnownFailure::UserAlreadyExists, KnownFailure::WrongPassword]
            .into_iter()
            .find(|failure| {
                let pattern = failure.pattern();
                match Regex::new(pattern) {
                    Ok(re) => re.is_match(message),
                    Err(e) => {
                        warn!("Failed to compile regex pattern '{}': {}", pattern, e);
                        false
                    }
                }
            })
    }
}

/// Report a failed API operation: known failures flip their coordinator
/// flag, anything else is shown as an error notice. Returns the recognized
/// failure, if any.
///
pub fn report_failure(
    error: &ApiError,
    navigator: &Navigator,
    notices: &mut Notices,
) -> Option<KnownFailure> {
    let known = error.server_message().and_then(KnownFailure::from_message);
    match known {
        Some(KnownFailure::UserAlreadyExists) => {
            warn!("Registration rejected: {}", error);
            navigator.set_registration_error(true);
        }
        Some(KnownFailure::WrongPassword) => {
            warn!("Login rejected: {}", error);
            navigator.set_remember_password_prompt(true);
        }
        None => {
            error!("Request failed: {}", error);
            match error.server_message() {
                Some(message) => notices.error(message),
                None => notices.error(error.to_string()),
            };
        }
    }
    known
}
