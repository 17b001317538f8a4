//! Port for reacting to committed application lifecycle events.
//!
//! The lifecycle service publishes after the state change is stored. A sink
//! failure is logged by the publisher and never undoes the change.

use async_trait::async_trait;

use crate::domain::ApplicationStatusChanged;

use super::define_port_error;

define_port_error! {
    /// Errors raised by event sinks.
    pub enum ApplicationEventSinkError {
        /// The event could not be delivered.
        Delivery { message: String } => "event delivery failed: {message}",
    }
}

/// Consumer of application lifecycle events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationEventSink: Send + Sync {
    /// Handle a committed status change.
    async fn status_changed(
        &self,
        event: &ApplicationStatusChanged,
    ) -> Result<(), ApplicationEventSinkError>;
}
