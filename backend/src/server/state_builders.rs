//! Builders wiring the lifecycle services onto a concrete store.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use jobs_backend::domain::ports::{
    ApplicationRepository, JobRepository, NotificationRepository, UserRepository,
};
use jobs_backend::domain::{
    ApplicationLifecycleService, ApplicationQueryService, NotificationDispatcher,
    NotificationInboxService,
};
use jobs_backend::inbound::http::state::HttpState;
use jobs_backend::outbound::memory::InMemoryStore;
use jobs_backend::outbound::persistence::{
    DieselApplicationRepository, DieselJobRepository, DieselNotificationRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// Driven ports a lifecycle deployment runs on.
struct Stores<A, J, U, N> {
    applications: Arc<A>,
    jobs: Arc<J>,
    users: Arc<U>,
    notifications: Arc<N>,
}

fn wire_services<A, J, U, N>(stores: Stores<A, J, U, N>, clock: Arc<dyn Clock>) -> HttpState
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserRepository + 'static,
    N: NotificationRepository + 'static,
{
    let Stores {
        applications,
        jobs,
        users,
        notifications,
    } = stores;
    let events = Arc::new(NotificationDispatcher::new(
        Arc::clone(&notifications),
        Arc::clone(&clock),
    ));
    HttpState::new(
        Arc::new(ApplicationLifecycleService::new(
            Arc::clone(&applications),
            jobs,
            users,
            events,
            Arc::clone(&clock),
        )),
        Arc::new(ApplicationQueryService::new(applications)),
        Arc::new(NotificationInboxService::new(notifications, clock)),
    )
}

/// Build the shared HTTP state, backed by PostgreSQL when a pool is
/// configured and by the in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "wiring lifecycle services");
            wire_services(
                Stores {
                    applications: Arc::new(DieselApplicationRepository::new(pool.clone())),
                    jobs: Arc::new(DieselJobRepository::new(pool.clone())),
                    users: Arc::new(DieselUserRepository::new(pool.clone())),
                    notifications: Arc::new(DieselNotificationRepository::new(pool.clone())),
                },
                clock,
            )
        }
        None => {
            info!(store = "memory", "wiring lifecycle services");
            let store = Arc::new(InMemoryStore::new());
            if let Some(seed) = &config.memory_seed {
                store.load_seed(seed, clock.utc());
            }
            wire_services(
                Stores {
                    applications: Arc::clone(&store),
                    jobs: Arc::clone(&store),
                    users: Arc::clone(&store),
                    notifications: store,
                },
                clock,
            )
        }
    }
}
