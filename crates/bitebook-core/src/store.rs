//! Repository traits and supporting types.
//!
//! The traits are implemented by storage backends (e.g.
//! `bitebook-store-sqlite`). Every method maps to exactly one statement
//! against one table. Reads return only [`Status::Enabled`] rows; the
//! id-scoped writes match on id alone, so they also reach rows that are
//! already deleted or disabled.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).
//!
//! [`Status::Enabled`]: crate::Status::Enabled

use std::future::Future;

use crate::{
  contact::{Contact, NewContact},
  restaurant::{NewRestaurant, Restaurant, RestaurantPatch},
};

// ─── Contacts ────────────────────────────────────────────────────────────────

pub trait ContactRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All contacts with status `ENABLED`, in storage order.
  fn list_active_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Insert a contact as `ENABLED` and unverified, returning the stored row.
  fn create_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Mark a contact `DELETED`. Returns `None` if no row has this id.
  fn soft_delete_contact(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Set `verified = true`. Returns `None` if no row has this id.
  fn verify_contact(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;
}

// ─── Restaurants ─────────────────────────────────────────────────────────────

pub trait RestaurantRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All restaurants with status `ENABLED`, in storage order.
  fn list_active_restaurants(
    &self,
  ) -> impl Future<Output = Result<Vec<Restaurant>, Self::Error>> + Send + '_;

  /// Insert a restaurant as `ENABLED`, returning the stored row.
  fn create_restaurant(
    &self,
    input: NewRestaurant,
  ) -> impl Future<Output = Result<Restaurant, Self::Error>> + Send + '_;

  /// Mark a restaurant `DELETED`. Returns `None` if no row has this id.
  fn soft_delete_restaurant(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Restaurant>, Self::Error>> + Send + '_;

  fn update_restaurant_rating(
    &self,
    id: i64,
    rating: Option<u8>,
  ) -> impl Future<Output = Result<Option<Restaurant>, Self::Error>> + Send + '_;

  fn update_restaurant_review(
    &self,
    id: i64,
    review: Option<String>,
  ) -> impl Future<Output = Result<Option<Restaurant>, Self::Error>> + Send + '_;

  /// Apply the fields present in `patch`; absent fields are untouched.
  /// An empty patch only refreshes `updated_time`.
  fn update_restaurant(
    &self,
    id: i64,
    patch: RestaurantPatch,
  ) -> impl Future<Output = Result<Option<Restaurant>, Self::Error>> + Send + '_;
}
