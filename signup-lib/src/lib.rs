//! Signup API client library
//!
//! An async client for the user signup backend: a single create-user
//! mutation plus a small query cache that is invalidated when users change.

pub mod api;
pub mod cache;
pub mod error;
pub mod model;
pub mod response;

mod client;

pub use client::*;
pub use response::CacheStatus;
pub use response::Response;
