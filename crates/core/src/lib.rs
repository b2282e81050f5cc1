//! Core business logic for threddit.

pub mod services;

pub use services::*;
