//! Panel cancellation scopes.
//!
//! Every panel owns one cancellation token from the moment it appears until
//! it is torn down. Requests issued by the panel are attached to the token,
//! so a response arriving after teardown is dropped instead of delivered.

use crate::navigation::{Overlay, PanelState};
use log::*;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Specifying the panel drawn on top of the page.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Overlay(Overlay),
    RenameUser,
}

impl Panel {
    /// Return the panel on top for the given state. A rendered overlay
    /// covers the rename modal.
    ///
    pub fn on_screen(state: &PanelState) -> Option<Panel> {
        match state.rendered_overlay() {
            Some(overlay) => Some(Panel::Overlay(overlay)),
            None if state.is_rename_user_modal() => Some(Panel::RenameUser),
            None => None,
        }
    }
}

/// Cancellation scope of the panel currently on screen.
///
#[derive(Debug)]
pub struct PanelScope {
    panel: Option<Panel>,
    token: CancellationToken,
}

impl PanelScope {
    /// Return a new scope for the given panel.
    ///
    pub fn new(panel: Option<Panel>) -> Self {
        PanelScope {
            panel,
            token: CancellationToken::new(),
        }
    }

    pub fn panel(&self) -> Option<Panel> {
        self.panel
    }

    /// Return a handle to attach requests to this scope.
    ///
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel every request attached to this scope.
    ///
    pub fn teardown(&self) {
        if !self.token.is_cancelled() {
            debug!("Tearing down scope for {:?}...", self.panel);
            self.token.cancel();
        }
    }

    /// Run `future` unless the scope is torn down first. Returns `None` when
    /// the result was abandoned.
    ///
    pub async fn guard<F: Future>(token: &CancellationToken, future: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = token.cancelled() => None,
            output = future => Some(output),
        }
    }
}

impl Drop for PanelScope {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Tracks the scope of whichever panel is currently rendered.
///
#[derive(Debug)]
pub struct PanelScopes {
    current: PanelScope,
}

impl PanelScopes {
    pub fn new() -> Self {
        PanelScopes {
            current: PanelScope::new(None),
        }
    }

    pub fn current(&self) -> &PanelScope {
        &self.current
    }

    /// Follow the panel state: when the panel on screen changes, tear down
    /// the previous scope and open a new one. Returns true if a new scope
    /// was opened.
    ///
    pub fn sync(&mut self, state: &PanelState) -> bool {
        let panel = Panel::on_screen(state);
        if panel == self.current.panel() {
            return false;
        }
        self.current = PanelScope::new(panel);
        true
    }
}

impl Default for PanelScopes {
    fn default() -> Self {
        PanelScopes::new()
    }
}
