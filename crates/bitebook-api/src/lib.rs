//! JSON REST API for Bitebook.
//!
//! Exposes an axum [`Router`] backed by any store implementing both
//! [`ContactRepository`] and [`RestaurantRepository`]. Each vertical has its
//! own router; [`api_router`] merges them. TLS, CORS and tracing layers are
//! the caller's responsibility.

pub mod contacts;
pub mod error;
pub mod restaurants;

use std::sync::Arc;

use axum::Router;
use bitebook_core::{
  service::{ContactService, RestaurantService},
  store::{ContactRepository, RestaurantRepository},
};

pub use error::ApiError;

/// Build the full API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ContactRepository + RestaurantRepository + 'static,
{
  Router::new()
    .merge(contacts::router(ContactService::new(Arc::clone(&store))))
    .merge(restaurants::router(RestaurantService::new(store)))
}
