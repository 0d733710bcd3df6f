//! Restaurants tracked by the user, and the visited / want-to-visit split.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Status;

// ─── Coordinates ─────────────────────────────────────────────────────────────

/// A map position. Stored as an opaque JSON pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  pub lng: f64,
  pub lat: f64,
}

// ─── Restaurant ──────────────────────────────────────────────────────────────

/// A stored restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
  pub id:           i64,
  pub created_time: DateTime<Utc>,
  pub updated_time: DateTime<Utc>,
  pub status:       Status,
  pub name:         String,
  pub address:      Option<String>,
  pub coordinates:  Option<Coordinates>,
  pub phone:        Option<String>,
  pub website:      Option<String>,
  pub description:  Option<String>,
  /// 1–5 stars.
  pub rating:       Option<u8>,
  pub review:       Option<String>,
}

impl Restaurant {
  /// A restaurant counts as visited once it has a review.
  pub fn is_visited(&self) -> bool { self.review.is_some() }
}

/// Input to [`crate::store::RestaurantRepository::create_restaurant`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRestaurant {
  pub name:        String,
  pub address:     Option<String>,
  pub coordinates: Option<Coordinates>,
  pub phone:       Option<String>,
  pub website:     Option<String>,
  pub description: Option<String>,
  pub rating:      Option<u8>,
  pub review:      Option<String>,
}

/// A partial update of a restaurant's core fields.
///
/// The outer `Option` says whether a field is being changed at all; for
/// nullable columns the inner `Option` is the new value. Absent fields are
/// skipped when serialised so the wire form stays a true subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RestaurantPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub address:     Option<Option<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub coordinates: Option<Option<Coordinates>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone:       Option<Option<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub website:     Option<Option<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<Option<String>>,
}

// ─── Partition ───────────────────────────────────────────────────────────────

/// Restaurants split by whether they have been reviewed. Never stored;
/// recompute it from the current list whenever it is shown.
#[derive(Debug, Default)]
pub struct Partition<'a> {
  pub want_to_visit: Vec<&'a Restaurant>,
  pub visited:       Vec<&'a Restaurant>,
}

/// Split `restaurants` into want-to-visit and visited, keeping input order.
pub fn partition(restaurants: &[Restaurant]) -> Partition<'_> {
  let (visited, want_to_visit): (Vec<_>, Vec<_>) =
    restaurants.iter().partition(|r| r.is_visited());
  Partition { want_to_visit, visited }
}
