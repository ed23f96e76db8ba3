//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The network thread is gone and no longer accepts events
    #[error("Network channel closed while dispatching {event}")]
    ChannelClosed { event: String },

    /// Submit was requested without an open form
    #[error("No form is open")]
    NoActiveForm,

    /// Selection was requested on an empty organization list
    #[error("No organization selected")]
    NoOrganizationSelected,
}
