//! Async HTTP client wrapping the Bitebook JSON API.
//!
//! Every method checks for one exact status code (201 for creates, 200
//! otherwise). Anything else becomes an error whose message is the generic
//! "Failed to …" text; the status and server body are kept as its cause.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use bitebook_core::{
  contact::{Contact, NewContact},
  restaurant::{NewRestaurant, Restaurant, RestaurantPatch},
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

pub const DEFAULT_URL: &str = "http://localhost:3000";

/// Connection settings for the Bitebook API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

impl Default for ApiConfig {
  fn default() -> Self { Self { base_url: DEFAULT_URL.to_owned() } }
}

/// Async HTTP client for the Bitebook JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str { &self.config.base_url }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Send `req`, require `expected`, and decode the JSON body.
  async fn send<T: DeserializeOwned>(
    req: RequestBuilder,
    expected: StatusCode,
    failure: &'static str,
  ) -> Result<T> {
    let resp = req.send().await.context(failure)?;
    let status = resp.status();
    if status != expected {
      let body = resp.text().await.unwrap_or_default();
      tracing::debug!(%status, %body, "{failure}");
      return Err(anyhow!("{status}: {body}").context(failure));
    }
    resp.json().await.context(failure)
  }

  // ── Contacts ──────────────────────────────────────────────────────────────

  /// `GET /contacts`
  pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let req = self.client.get(self.url("/contacts"));
    Self::send(req, StatusCode::OK, "Failed to get contacts list").await
  }

  /// `POST /contacts`
  pub async fn add_contact(&self, contact: &NewContact) -> Result<Contact> {
    let req = self.client.post(self.url("/contacts")).json(contact);
    Self::send(req, StatusCode::CREATED, "Failed to add contact").await
  }

  /// `DELETE /contacts/{id}`
  pub async fn delete_contact(&self, id: i64) -> Result<Contact> {
    let req = self.client.delete(self.url(&format!("/contacts/{id}")));
    Self::send(req, StatusCode::OK, "Failed to delete contact").await
  }

  /// `PATCH /contacts/{id}`
  pub async fn verify_contact(&self, id: i64) -> Result<Contact> {
    let req = self
      .client
      .patch(self.url(&format!("/contacts/{id}")))
      .json(&json!({ "verified": true }));
    Self::send(req, StatusCode::OK, "Failed to verify contact").await
  }

  // ── Restaurants ───────────────────────────────────────────────────────────

  /// `GET /restaurants`
  pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>> {
    let req = self.client.get(self.url("/restaurants"));
    Self::send(req, StatusCode::OK, "Failed to get restaurants list").await
  }

  /// `POST /restaurants`
  pub async fn add_restaurant(&self, restaurant: &NewRestaurant) -> Result<Restaurant> {
    let req = self.client.post(self.url("/restaurants")).json(restaurant);
    Self::send(req, StatusCode::CREATED, "Failed to add restaurant").await
  }

  /// `DELETE /restaurants/{id}`
  pub async fn delete_restaurant(&self, id: i64) -> Result<Restaurant> {
    let req = self.client.delete(self.url(&format!("/restaurants/{id}")));
    Self::send(req, StatusCode::OK, "Failed to delete restaurant").await
  }

  /// `PATCH /restaurants/{id}`
  pub async fn update_restaurant(
    &self,
    id: i64,
    patch: &RestaurantPatch,
  ) -> Result<Restaurant> {
    let req = self
      .client
      .patch(self.url(&format!("/restaurants/{id}")))
      .json(patch);
    Self::send(req, StatusCode::OK, "Failed to update restaurant").await
  }

  /// `PATCH /restaurants/{id}/rating`
  pub async fn update_rating(&self, id: i64, rating: Option<u8>) -> Result<Restaurant> {
    let req = self
      .client
      .patch(self.url(&format!("/restaurants/{id}/rating")))
      .json(&json!({ "rating": rating }));
    Self::send(req, StatusCode::OK, "Failed to update rating").await
  }

  /// `PATCH /restaurants/{id}/review`
  pub async fn update_review(&self, id: i64, review: Option<&str>) -> Result<Restaurant> {
    let req = self
      .client
      .patch(self.url(&format!("/restaurants/{id}/review")))
      .json(&json!({ "review": review }));
    Self::send(req, StatusCode::OK, "Failed to update review").await
  }
}
