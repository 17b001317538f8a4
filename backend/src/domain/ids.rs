//! Strongly typed identifiers for portal entities.
//!
//! Every identifier wraps a UUID. Parsing distinguishes a missing value from a
//! malformed one so callers can report which validation rule failed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::Error;

/// Reasons a raw identifier is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// The value was empty or whitespace.
    #[error("identifier is required")]
    Missing,
    /// The value is not a UUID.
    #[error("identifier must be a valid UUID")]
    Malformed,
}

impl IdValidationError {
    const fn code(self) -> &'static str {
        match self {
            Self::Missing => "missing_field",
            Self::Malformed => "invalid_uuid",
        }
    }
}

fn parse_uuid(raw: &str) -> Result<Uuid, IdValidationError> {
    if raw.trim().is_empty() {
        return Err(IdValidationError::Missing);
    }
    Uuid::parse_str(raw).map_err(|_| IdValidationError::Malformed)
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Validate and construct the identifier from raw input.
            pub fn parse(raw: &str) -> Result<Self, IdValidationError> {
                parse_uuid(raw).map(Self)
            }

            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_id! {
    /// Identifier of a job application.
    ApplicationId
}

define_id! {
    /// Identifier of a job posting.
    JobId
}

define_id! {
    /// Identifier of a registered job seeker.
    UserId
}

define_id! {
    /// Identifier of the employer that owns a job posting.
    EmployerId
}

define_id! {
    /// Identifier of a stored notification.
    NotificationId
}

/// Parse a request field into a typed identifier, reporting failures as
/// [`Error::invalid_request`] with the offending field in the details.
///
/// # Examples
/// ```
/// use jobs_backend::domain::{ErrorCode, JobId, parse_id_field};
///
/// let err = parse_id_field::<JobId>("nope", "jobId").expect_err("malformed");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// ```
pub fn parse_id_field<T>(raw: &str, field: &'static str) -> Result<T, Error>
where
    T: FromStr<Err = IdValidationError>,
{
    raw.parse::<T>().map_err(|reason| {
        let message = match reason {
            IdValidationError::Missing => format!("{field} is required"),
            IdValidationError::Malformed => format!("{field} must be a valid UUID"),
        };
        Error::invalid_request(message).with_details(json!({
            "field": field,
            "value": raw,
            "code": reason.code(),
        }))
    })
}
