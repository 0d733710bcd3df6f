//! The restaurant save sequence.
//!
//! Editing runs up to three requests in order: the core fields, then (when
//! the review section is shown and a rating is picked) the rating, then the
//! review. Each step runs only if the previous one succeeded. Nothing is
//! rolled back, so a failure part-way leaves the earlier steps applied;
//! [`SaveError`] says exactly which.

use std::fmt;

use bitebook_core::restaurant::{NewRestaurant, Restaurant};

use crate::{data::Bitebook, form::RestaurantEdit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStep {
  Fields,
  Rating,
  Review,
}

impl fmt::Display for SaveStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Fields => "fields",
      Self::Rating => "rating",
      Self::Review => "review",
    })
  }
}

/// A save that stopped at `failed`. Every step in `applied` has already
/// been committed on the server.
#[derive(Debug, thiserror::Error)]
#[error("saving restaurant {id} failed at the {failed} step")]
pub struct SaveError {
  pub id:      i64,
  pub applied: Vec<SaveStep>,
  pub failed:  SaveStep,
  #[source]
  pub source:  Box<dyn std::error::Error + Send + Sync>,
}

impl SaveError {
  pub fn is_partial(&self) -> bool { !self.applied.is_empty() }
}

/// What a completed save did.
#[derive(Debug)]
pub struct Saved {
  pub restaurant: Restaurant,
  pub applied:    Vec<SaveStep>,
}

/// Run the edit sequence for restaurant `id`.
pub async fn save_restaurant(
  data: &Bitebook,
  id: i64,
  edit: &RestaurantEdit,
) -> Result<Saved, SaveError> {
  let mut applied = Vec::new();
  let fail = |applied: Vec<SaveStep>, failed: SaveStep, e: anyhow::Error| {
    let cause = format!("{e:#}");
    tracing::warn!(id, %failed, ?applied, error = %cause, "restaurant save stopped");
    SaveError { id, applied, failed, source: e.into() }
  };

  let mut restaurant = match data.update_restaurant(id, &edit.fields).await {
    Ok(r) => r,
    Err(e) => return Err(fail(applied, SaveStep::Fields, e)),
  };
  applied.push(SaveStep::Fields);

  let Some(section) = &edit.review else {
    return Ok(Saved { restaurant, applied });
  };
  let Some(rating) = section.rating() else {
    return Ok(Saved { restaurant, applied });
  };

  restaurant = match data.update_rating(id, Some(rating)).await {
    Ok(r) => r,
    Err(e) => return Err(fail(applied, SaveStep::Rating, e)),
  };
  applied.push(SaveStep::Rating);

  let review = section.review();
  restaurant = match data.update_review(id, review.as_deref()).await {
    Ok(r) => r,
    Err(e) => return Err(fail(applied, SaveStep::Review, e)),
  };
  applied.push(SaveStep::Review);

  tracing::info!(id, ?applied, "restaurant saved");
  Ok(Saved { restaurant, applied })
}

/// Adding is a single request; rating and review travel in the create body.
pub async fn add_restaurant(
  data: &Bitebook,
  restaurant: &NewRestaurant,
) -> anyhow::Result<Restaurant> {
  let created = data.add_restaurant(restaurant).await?;
  tracing::info!(id = created.id, "restaurant added");
  Ok(created)
}
