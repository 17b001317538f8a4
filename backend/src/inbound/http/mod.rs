//! HTTP inbound adapter exposing the REST endpoints.

pub mod applications;
pub mod error;
pub mod health;
pub mod notifications;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
