//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path             | Notes |
//! |----------|------------------|-------|
//! | `GET`    | `/contacts`      | Enabled contacts only |
//! | `POST`   | `/contacts`      | Body: contact fields; returns 201 + stored contact |
//! | `DELETE` | `/contacts/{id}` | Soft delete; 404 if no such id |
//! | `PATCH`  | `/contacts/{id}` | Verify; no body needed; 404 if no such id |

use axum::{
  Json, Router,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
  routing::get,
};
use bitebook_core::{
  contact::Contact,
  service::ContactService,
  store::ContactRepository,
  validate,
};
use serde_json::Value;

use crate::error::ApiError;

const NOT_FOUND: &str = "Contact not found";

/// Routes for the contacts vertical.
pub fn router<S>(service: ContactService<S>) -> Router<()>
where
  S: ContactRepository + 'static,
{
  Router::new()
    .route("/contacts", get(list::<S>).post(create::<S>))
    .route("/contacts/{id}", axum::routing::delete(delete::<S>).patch(verify::<S>))
    .with_state(service)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(
  State(service): State<ContactService<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactRepository,
{
  let contacts = service
    .list()
    .await
    .map_err(|e| ApiError::store("Failed to fetch contacts", e))?;
  Ok(Json(contacts))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts`: returns 201 and the stored [`Contact`].
pub async fn create<S>(
  State(service): State<ContactService<S>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactRepository,
{
  let Json(body) = body?;
  let input = validate::contact(&body)?;

  let contact = service
    .add(input)
    .await
    .map_err(|e| ApiError::store("Failed to add contact", e))?;
  tracing::info!(id = contact.id, "contact added");
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/{id}` marks the contact `DELETED`.
pub async fn delete<S>(
  State(service): State<ContactService<S>>,
  Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactRepository,
{
  let contact = service
    .delete(&id)
    .await
    .map_err(|e| ApiError::store("Failed to delete contact", e))?
    .ok_or(ApiError::NotFound(NOT_FOUND))?;
  tracing::info!(id = contact.id, "contact deleted");
  Ok(Json(contact))
}

// ─── Verify ───────────────────────────────────────────────────────────────────

/// `PATCH /contacts/{id}` sets `verified`. Any request body is ignored.
pub async fn verify<S>(
  State(service): State<ContactService<S>>,
  Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactRepository,
{
  let contact = service
    .verify(&id)
    .await
    .map_err(|e| ApiError::store("Failed to verify contact", e))?
    .ok_or(ApiError::NotFound(NOT_FOUND))?;
  tracing::info!(id = contact.id, "contact verified");
  Ok(Json(contact))
}
