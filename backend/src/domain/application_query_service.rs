//! Read side of the application lifecycle.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::application_lifecycle_service::map_application_error;
use crate::domain::ports::{ApplicationQuery, ApplicationRepository, ListUserApplicationsRequest};
use crate::domain::{AppliedJob, Error, Page, PageRequest, UserId, parse_id_field};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_APPLICATIONS_PAGE_SIZE: u32 = 5;

/// Domain service implementing the application query port.
#[derive(Clone)]
pub struct ApplicationQueryService<A> {
    applications: Arc<A>,
}

impl<A> ApplicationQueryService<A> {
    pub fn new(applications: Arc<A>) -> Self {
        Self { applications }
    }
}

#[async_trait]
impl<A> ApplicationQuery for ApplicationQueryService<A>
where
    A: ApplicationRepository,
{
    async fn list_for_user(
        &self,
        request: ListUserApplicationsRequest,
    ) -> Result<Page<AppliedJob>, Error> {
        let user_id: UserId = parse_id_field(&request.user_id, "userId")?;
        let page = PageRequest::new(
            request.page,
            request.page_size,
            DEFAULT_APPLICATIONS_PAGE_SIZE,
        )?;

        self.applications
            .list_for_user(&user_id, page)
            .await
            .map_err(map_application_error)
    }
}
