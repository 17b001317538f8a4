//! Offset pagination shared by the listing queries.

use serde_json::json;

use super::Error;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validated one-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Validate an optional page number and size, falling back to page 1 and
    /// `default_size`.
    ///
    /// # Examples
    /// ```
    /// use jobs_backend::domain::PageRequest;
    ///
    /// let request = PageRequest::new(Some(3), None, 5).expect("valid page");
    /// assert_eq!(request.offset(), 10);
    /// assert!(PageRequest::new(Some(0), None, 5).is_err());
    /// ```
    pub fn new(
        page: Option<u32>,
        page_size: Option<u32>,
        default_size: u32,
    ) -> Result<Self, Error> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(Error::invalid_request("page must be at least 1")
                .with_details(json!({ "field": "page", "value": page })));
        }
        let page_size = page_size.unwrap_or(default_size);
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(Error::invalid_request(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            ))
            .with_details(json!({ "field": "limit", "value": page_size })));
        }
        Ok(Self { page, page_size })
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of records to skip.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }
}

/// One page of results plus the total across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    /// Number of pages needed to show `total` records.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.request.page_size))
    }
}
