//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data` so they depend only
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ApplicationCommand, ApplicationQuery, NotificationInbox};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub applications: Arc<dyn ApplicationCommand>,
    pub application_queries: Arc<dyn ApplicationQuery>,
    pub notifications: Arc<dyn NotificationInbox>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use jobs_backend::domain::{
    ///     ApplicationLifecycleService, ApplicationQueryService, NotificationDispatcher,
    ///     NotificationInboxService,
    /// };
    /// use jobs_backend::inbound::http::state::HttpState;
    /// use jobs_backend::outbound::memory::InMemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let events = Arc::new(NotificationDispatcher::new(
    ///     Arc::clone(&store),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(
    ///     Arc::new(ApplicationLifecycleService::new(
    ///         Arc::clone(&store),
    ///         Arc::clone(&store),
    ///         Arc::clone(&store),
    ///         events,
    ///         Arc::new(DefaultClock),
    ///     )),
    ///     Arc::new(ApplicationQueryService::new(Arc::clone(&store))),
    ///     Arc::new(NotificationInboxService::new(store, Arc::new(DefaultClock))),
    /// );
    /// let _queries = state.application_queries.clone();
    /// ```
    pub fn new(
        applications: Arc<dyn ApplicationCommand>,
        application_queries: Arc<dyn ApplicationQuery>,
        notifications: Arc<dyn NotificationInbox>,
    ) -> Self {
        Self {
            applications,
            application_queries,
            notifications,
        }
    }
}
