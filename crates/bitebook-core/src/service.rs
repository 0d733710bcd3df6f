//! Services sitting between the HTTP handlers and the repositories.
//!
//! They hold no business rules beyond turning the string id from a request
//! path into a numeric id. An id that does not parse can never match a row,
//! so it short-circuits to "not found" without touching the store.

use std::sync::Arc;

use crate::{
  contact::{Contact, NewContact},
  restaurant::{NewRestaurant, Restaurant, RestaurantPatch},
  store::{ContactRepository, RestaurantRepository},
};

/// Parse a path id. Surrounding whitespace is tolerated; anything else that
/// is not a base-10 integer yields `None`.
pub fn parse_id(raw: &str) -> Option<i64> { raw.trim().parse().ok() }

// ─── Contacts ────────────────────────────────────────────────────────────────

pub struct ContactService<S> {
  store: Arc<S>,
}

impl<S> Clone for ContactService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: ContactRepository> ContactService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn list(&self) -> Result<Vec<Contact>, S::Error> {
    self.store.list_active_contacts().await
  }

  pub async fn add(&self, input: NewContact) -> Result<Contact, S::Error> {
    self.store.create_contact(input).await
  }

  pub async fn delete(&self, id: &str) -> Result<Option<Contact>, S::Error> {
    let Some(id) = parse_id(id) else { return Ok(None) };
    self.store.soft_delete_contact(id).await
  }

  pub async fn verify(&self, id: &str) -> Result<Option<Contact>, S::Error> {
    let Some(id) = parse_id(id) else { return Ok(None) };
    self.store.verify_contact(id).await
  }
}

// ─── Restaurants ─────────────────────────────────────────────────────────────

pub struct RestaurantService<S> {
  store: Arc<S>,
}

impl<S> Clone for RestaurantService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: RestaurantRepository> RestaurantService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn list(&self) -> Result<Vec<Restaurant>, S::Error> {
    self.store.list_active_restaurants().await
  }

  pub async fn add(&self, input: NewRestaurant) -> Result<Restaurant, S::Error> {
    self.store.create_restaurant(input).await
  }

  pub async fn delete(&self, id: &str) -> Result<Option<Restaurant>, S::Error> {
    let Some(id) = parse_id(id) else { return Ok(None) };
    self.store.soft_delete_restaurant(id).await
  }

  pub async fn update_rating(
    &self,
    id: &str,
    rating: Option<u8>,
  ) -> Result<Option<Restaurant>, S::Error> {
    let Some(id) = parse_id(id) else { return Ok(None) };
    self.store.update_restaurant_rating(id, rating).await
  }

  pub async fn update_review(
    &self,
    id: &str,
    review: Option<String>,
  ) -> Result<Option<Restaurant>, S::Error> {
    let Some(id) = parse_id(id) else { return Ok(None) };
    self.store.update_restaurant_review(id, review).await
  }

  pub async fn update(
    &self,
    id: &str,
    patch: RestaurantPatch,
  ) -> Result<Option<Restaurant>, S::Error> {
    let Some(id) = parse_id(id) else { return Ok(None) };
    self.store.update_restaurant(id, patch).await
  }
}
