//! [`SqliteStore`]: the SQLite implementation of the repository traits.

use std::{num::NonZeroUsize, path::Path, sync::Arc};

use bitebook_core::{
  Status,
  contact::{Contact, NewContact},
  restaurant::{NewRestaurant, Restaurant, RestaurantPatch},
  store::{ContactRepository, RestaurantRepository},
};
use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};

use crate::{
  Error, Result,
  encode::{
    RawContact, RawRestaurant, coordinates_value, encode_dt, rating_value,
    text_value,
  },
  pool::Pool,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Bitebook store backed by a single SQLite file.
///
/// Cloning is cheap; the connection pool is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pool: Arc<Pool>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` with `pool_size` connections and run
  /// schema initialisation.
  pub async fn open(path: impl AsRef<Path>, pool_size: NonZeroUsize) -> Result<Self> {
    let pool = Pool::open(path.as_ref(), pool_size).await?;
    Ok(Self { pool: Arc::new(pool) })
  }

  /// Open an in-memory store with a single connection.
  pub async fn open_in_memory() -> Result<Self> {
    let pool = Pool::open_in_memory().await?;
    Ok(Self { pool: Arc::new(pool) })
  }

  /// Number of pooled connections.
  pub fn pool_size(&self) -> usize { self.pool.size() }

  pub(crate) fn conn(&self) -> &tokio_rusqlite::Connection { self.pool.get() }

  /// Run one `... RETURNING` statement against `contacts` that yields at
  /// most one row.
  async fn contact_returning(
    &self,
    sql: String,
    params: Vec<Value>,
  ) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params_from_iter(params), RawContact::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  /// Run one `... RETURNING` statement against `restaurants` that yields at
  /// most one row.
  async fn restaurant_returning(
    &self,
    sql: String,
    params: Vec<Value>,
  ) -> Result<Option<Restaurant>> {
    let raw: Option<RawRestaurant> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params_from_iter(params), RawRestaurant::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRestaurant::into_restaurant).transpose()
  }
}

fn now_value() -> Value { Value::Text(encode_dt(Utc::now())) }

fn status_value(status: Status) -> Value { Value::Text(status.as_str().to_owned()) }

/// `INSERT ... RETURNING` always yields the inserted row.
fn inserted<T>(row: Option<T>, table: &'static str) -> Result<T> {
  row.ok_or(Error::NothingReturned(table))
}

// ─── ContactRepository impl ──────────────────────────────────────────────────

impl ContactRepository for SqliteStore {
  type Error = Error;

  async fn list_active_contacts(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn()
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM contacts WHERE status = ?1",
          RawContact::COLUMNS
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![Status::Enabled.as_str()], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn create_contact(&self, input: NewContact) -> Result<Contact> {
    let sql = format!(
      "INSERT INTO contacts (
         created_time, updated_time, status,
         first_name, last_name, email, phone, notes, verified
       ) VALUES (?1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, 0)
       RETURNING {}",
      RawContact::COLUMNS
    );
    let params = vec![
      now_value(),
      status_value(Status::Enabled),
      Value::Text(input.first_name),
      Value::Text(input.last_name),
      Value::Text(input.email),
      Value::Text(input.phone),
      text_value(input.notes),
    ];

    let contact = inserted(self.contact_returning(sql, params).await?, "contacts")?;
    tracing::debug!(id = contact.id, "contact inserted");
    Ok(contact)
  }

  async fn soft_delete_contact(&self, id: i64) -> Result<Option<Contact>> {
    let sql = format!(
      "UPDATE contacts SET status = ?1, updated_time = ?2 WHERE id = ?3 RETURNING {}",
      RawContact::COLUMNS
    );
    let params = vec![status_value(Status::Deleted), now_value(), Value::Integer(id)];
    self.contact_returning(sql, params).await
  }

  async fn verify_contact(&self, id: i64) -> Result<Option<Contact>> {
    let sql = format!(
      "UPDATE contacts SET verified = 1, updated_time = ?1 WHERE id = ?2 RETURNING {}",
      RawContact::COLUMNS
    );
    let params = vec![now_value(), Value::Integer(id)];
    self.contact_returning(sql, params).await
  }
}

// ─── RestaurantRepository impl ───────────────────────────────────────────────

impl RestaurantRepository for SqliteStore {
  type Error = Error;

  async fn list_active_restaurants(&self) -> Result<Vec<Restaurant>> {
    let raws: Vec<RawRestaurant> = self
      .conn()
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM restaurants WHERE status = ?1",
          RawRestaurant::COLUMNS
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![Status::Enabled.as_str()], RawRestaurant::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRestaurant::into_restaurant).collect()
  }

  async fn create_restaurant(&self, input: NewRestaurant) -> Result<Restaurant> {
    let sql = format!(
      "INSERT INTO restaurants (
         created_time, updated_time, status,
         name, address, coordinates, phone, website, description, rating, review
       ) VALUES (?1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
       RETURNING {}",
      RawRestaurant::COLUMNS
    );
    let params = vec![
      now_value(),
      status_value(Status::Enabled),
      Value::Text(input.name),
      text_value(input.address),
      coordinates_value(input.coordinates.as_ref())?,
      text_value(input.phone),
      text_value(input.website),
      text_value(input.description),
      rating_value(input.rating),
      text_value(input.review),
    ];

    let restaurant = inserted(self.restaurant_returning(sql, params).await?, "restaurants")?;
    tracing::debug!(id = restaurant.id, "restaurant inserted");
    Ok(restaurant)
  }

  async fn soft_delete_restaurant(&self, id: i64) -> Result<Option<Restaurant>> {
    let sql = format!(
      "UPDATE restaurants SET status = ?1, updated_time = ?2 WHERE id = ?3 RETURNING {}",
      RawRestaurant::COLUMNS
    );
    let params = vec![status_value(Status::Deleted), now_value(), Value::Integer(id)];
    self.restaurant_returning(sql, params).await
  }

  async fn update_restaurant_rating(
    &self,
    id:     i64,
    rating: Option<u8>,
  ) -> Result<Option<Restaurant>> {
    let sql = format!(
      "UPDATE restaurants SET rating = ?1, updated_time = ?2 WHERE id = ?3 RETURNING {}",
      RawRestaurant::COLUMNS
    );
    let params = vec![rating_value(rating), now_value(), Value::Integer(id)];
    self.restaurant_returning(sql, params).await
  }

  async fn update_restaurant_review(
    &self,
    id:     i64,
    review: Option<String>,
  ) -> Result<Option<Restaurant>> {
    let sql = format!(
      "UPDATE restaurants SET review = ?1, updated_time = ?2 WHERE id = ?3 RETURNING {}",
      RawRestaurant::COLUMNS
    );
    let params = vec![text_value(review), now_value(), Value::Integer(id)];
    self.restaurant_returning(sql, params).await
  }

  async fn update_restaurant(
    &self,
    id:    i64,
    patch: RestaurantPatch,
  ) -> Result<Option<Restaurant>> {
    // Build the SET list from the fields present in the patch.
    let mut sets: Vec<String> = vec!["updated_time = ?1".to_owned()];
    let mut params: Vec<Value> = vec![now_value()];
    {
      let mut set = |column: &str, value: Value| {
        params.push(value);
        sets.push(format!("{column} = ?{}", params.len()));
      };

      if let Some(name) = patch.name {
        set("name", Value::Text(name));
      }
      if let Some(address) = patch.address {
        set("address", text_value(address));
      }
      if let Some(coordinates) = patch.coordinates {
        set("coordinates", coordinates_value(coordinates.as_ref())?);
      }
      if let Some(phone) = patch.phone {
        set("phone", text_value(phone));
      }
      if let Some(website) = patch.website {
        set("website", text_value(website));
      }
      if let Some(description) = patch.description {
        set("description", text_value(description));
      }
    }

    params.push(Value::Integer(id));
    let sql = format!(
      "UPDATE restaurants SET {} WHERE id = ?{} RETURNING {}",
      sets.join(", "),
      params.len(),
      RawRestaurant::COLUMNS
    );
    self.restaurant_returning(sql, params).await
  }
}
