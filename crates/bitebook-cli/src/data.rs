//! Queries and mutations over the API, backed by a [`QueryCache`].

use std::sync::Arc;

use anyhow::Result;
use bitebook_core::{
  contact::{Contact, NewContact},
  restaurant::{NewRestaurant, Restaurant, RestaurantPatch},
};

use crate::{
  cache::{QueryCache, QueryKey},
  client::ApiClient,
};

/// Data access for the client views.
///
/// Cheap to clone; clones share the same HTTP client and cache.
#[derive(Clone)]
pub struct Bitebook {
  client: ApiClient,
  cache:  Arc<QueryCache>,
}

impl Bitebook {
  pub fn new(client: ApiClient, cache: Arc<QueryCache>) -> Self { Self { client, cache } }

  pub fn cache(&self) -> &QueryCache { &self.cache }

  pub fn base_url(&self) -> &str { self.client.base_url() }

  // ── Queries ───────────────────────────────────────────────────────────────

  pub async fn contacts(&self) -> Result<Arc<Vec<Contact>>> {
    if let Some(hit) = self.cache.contacts() {
      return Ok(hit);
    }
    let list = self.client.list_contacts().await?;
    Ok(self.cache.put_contacts(list))
  }

  pub async fn restaurants(&self) -> Result<Arc<Vec<Restaurant>>> {
    if let Some(hit) = self.cache.restaurants() {
      return Ok(hit);
    }
    let list = self.client.list_restaurants().await?;
    Ok(self.cache.put_restaurants(list))
  }

  // ── Contact mutations ─────────────────────────────────────────────────────

  pub async fn add_contact(&self, contact: &NewContact) -> Result<Contact> {
    let created = self.client.add_contact(contact).await?;
    self.cache.invalidate(QueryKey::Contacts);
    Ok(created)
  }

  pub async fn delete_contact(&self, id: i64) -> Result<Contact> {
    let deleted = self.client.delete_contact(id).await?;
    self.cache.invalidate(QueryKey::Contacts);
    Ok(deleted)
  }

  pub async fn verify_contact(&self, id: i64) -> Result<Contact> {
    let verified = self.client.verify_contact(id).await?;
    self.cache.invalidate(QueryKey::Contacts);
    Ok(verified)
  }

  // ── Restaurant mutations ──────────────────────────────────────────────────

  pub async fn add_restaurant(&self, restaurant: &NewRestaurant) -> Result<Restaurant> {
    let created = self.client.add_restaurant(restaurant).await?;
    self.cache.invalidate(QueryKey::Restaurants);
    Ok(created)
  }

  pub async fn delete_restaurant(&self, id: i64) -> Result<Restaurant> {
    let deleted = self.client.delete_restaurant(id).await?;
    self.cache.invalidate(QueryKey::Restaurants);
    Ok(deleted)
  }

  pub async fn update_restaurant(
    &self,
    id: i64,
    patch: &RestaurantPatch,
  ) -> Result<Restaurant> {
    let updated = self.client.update_restaurant(id, patch).await?;
    self.cache.invalidate(QueryKey::Restaurants);
    Ok(updated)
  }

  pub async fn update_rating(&self, id: i64, rating: Option<u8>) -> Result<Restaurant> {
    let updated = self.client.update_rating(id, rating).await?;
    self.cache.invalidate(QueryKey::Restaurants);
    Ok(updated)
  }

  pub async fn update_review(&self, id: i64, review: Option<&str>) -> Result<Restaurant> {
    let updated = self.client.update_review(id, review).await?;
    self.cache.invalidate(QueryKey::Restaurants);
    Ok(updated)
  }
}
