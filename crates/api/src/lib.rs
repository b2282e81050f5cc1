//! HTTP API layer for threddit.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: user relationships, communities, notifications, account
//! - **Extractors**: bearer-token authentication
//! - **Middleware**: application state and auth
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
