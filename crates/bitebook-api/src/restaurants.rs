//! Handlers for `/restaurants` endpoints.
//!
//! | Method   | Path                       | Notes |
//! |----------|----------------------------|-------|
//! | `GET`    | `/restaurants`             | Enabled restaurants only |
//! | `POST`   | `/restaurants`             | Body: restaurant fields, optionally `rating`/`review`; returns 201 |
//! | `DELETE` | `/restaurants/{id}`        | Soft delete |
//! | `PATCH`  | `/restaurants/{id}`        | Body: any subset of the core fields |
//! | `PATCH`  | `/restaurants/{id}/rating` | Body: `{"rating": 1-5 \| null}` |
//! | `PATCH`  | `/restaurants/{id}/review` | Body: `{"review": "..." \| null}` |

use axum::{
  Json, Router,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
  routing::{get, patch},
};
use bitebook_core::{
  restaurant::Restaurant,
  service::RestaurantService,
  store::RestaurantRepository,
  validate,
};
use serde_json::Value;

use crate::error::ApiError;

const NOT_FOUND: &str = "Restaurant not found";

type Body = Result<Json<Value>, JsonRejection>;

/// Routes for the restaurants vertical.
pub fn router<S>(service: RestaurantService<S>) -> Router<()>
where
  S: RestaurantRepository + 'static,
{
  Router::new()
    .route("/restaurants", get(list::<S>).post(create::<S>))
    .route(
      "/restaurants/{id}",
      axum::routing::delete(delete::<S>).patch(update::<S>),
    )
    .route("/restaurants/{id}/rating", patch(update_rating::<S>))
    .route("/restaurants/{id}/review", patch(update_review::<S>))
    .with_state(service)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /restaurants`
pub async fn list<S>(
  State(service): State<RestaurantService<S>>,
) -> Result<Json<Vec<Restaurant>>, ApiError>
where
  S: RestaurantRepository,
{
  let restaurants = service
    .list()
    .await
    .map_err(|e| ApiError::store("Failed to fetch restaurants", e))?;
  Ok(Json(restaurants))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /restaurants`: returns 201 and the stored [`Restaurant`].
pub async fn create<S>(
  State(service): State<RestaurantService<S>>,
  body: Body,
) -> Result<impl IntoResponse, ApiError>
where
  S: RestaurantRepository,
{
  let Json(body) = body?;
  let input = validate::restaurant(&body)?;

  let restaurant = service
    .add(input)
    .await
    .map_err(|e| ApiError::store("Failed to add restaurant", e))?;
  tracing::info!(id = restaurant.id, "restaurant added");
  Ok((StatusCode::CREATED, Json(restaurant)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /restaurants/{id}`
pub async fn delete<S>(
  State(service): State<RestaurantService<S>>,
  Path(id): Path<String>,
) -> Result<Json<Restaurant>, ApiError>
where
  S: RestaurantRepository,
{
  let restaurant = service
    .delete(&id)
    .await
    .map_err(|e| ApiError::store("Failed to delete restaurant", e))?
    .ok_or(ApiError::NotFound(NOT_FOUND))?;
  tracing::info!(id = restaurant.id, "restaurant deleted");
  Ok(Json(restaurant))
}

// ─── Updates ──────────────────────────────────────────────────────────────────

/// `PATCH /restaurants/{id}` updates only the fields present in the body.
pub async fn update<S>(
  State(service): State<RestaurantService<S>>,
  Path(id): Path<String>,
  body: Body,
) -> Result<Json<Restaurant>, ApiError>
where
  S: RestaurantRepository,
{
  let Json(body) = body?;
  let patch = validate::restaurant_patch(&body)?;

  let restaurant = service
    .update(&id, patch)
    .await
    .map_err(|e| ApiError::store("Failed to update restaurant", e))?
    .ok_or(ApiError::NotFound(NOT_FOUND))?;
  tracing::info!(id = restaurant.id, "restaurant updated");
  Ok(Json(restaurant))
}

/// `PATCH /restaurants/{id}/rating`
pub async fn update_rating<S>(
  State(service): State<RestaurantService<S>>,
  Path(id): Path<String>,
  body: Body,
) -> Result<Json<Restaurant>, ApiError>
where
  S: RestaurantRepository,
{
  let Json(body) = body?;
  let rating = validate::rating(&body)?;

  let restaurant = service
    .update_rating(&id, rating)
    .await
    .map_err(|e| ApiError::store("Failed to update rating", e))?
    .ok_or(ApiError::NotFound(NOT_FOUND))?;
  tracing::info!(id = restaurant.id, ?rating, "restaurant rated");
  Ok(Json(restaurant))
}

/// `PATCH /restaurants/{id}/review`
pub async fn update_review<S>(
  State(service): State<RestaurantService<S>>,
  Path(id): Path<String>,
  body: Body,
) -> Result<Json<Restaurant>, ApiError>
where
  S: RestaurantRepository,
{
  let Json(body) = body?;
  let review = validate::review(&body)?;

  let restaurant = service
    .update_review(&id, review)
    .await
    .map_err(|e| ApiError::store("Failed to update review", e))?
    .ok_or(ApiError::NotFound(NOT_FOUND))?;
  tracing::info!(id = restaurant.id, "restaurant reviewed");
  Ok(Json(restaurant))
}
