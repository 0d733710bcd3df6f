//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, coordinates as compact JSON,
//! status as its upper-case name.

use bitebook_core::{
  Status,
  contact::Contact,
  restaurant::{Coordinates, Restaurant},
};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Coordinates ─────────────────────────────────────────────────────────────

pub fn encode_coordinates(c: &Coordinates) -> Result<String> {
  Ok(serde_json::to_string(c)?)
}

pub fn decode_coordinates(s: &str) -> Result<Coordinates> {
  Ok(serde_json::from_str(s)?)
}

// ─── Bind values ─────────────────────────────────────────────────────────────

/// Owned bind value for a nullable text column.
pub fn text_value(s: Option<String>) -> Value {
  s.map(Value::Text).unwrap_or(Value::Null)
}

pub fn coordinates_value(c: Option<&Coordinates>) -> Result<Value> {
  Ok(c.map(encode_coordinates).transpose()?.map(Value::Text).unwrap_or(Value::Null))
}

pub fn rating_value(r: Option<u8>) -> Value {
  r.map(|r| Value::Integer(i64::from(r))).unwrap_or(Value::Null)
}

// ─── Raw row types ───────────────────────────────────────────────────────────

/// A `contacts` row as read from SQLite, before decoding.
pub struct RawContact {
  pub id:           i64,
  pub created_time: String,
  pub updated_time: String,
  pub status:       String,
  pub first_name:   String,
  pub last_name:    String,
  pub email:        String,
  pub phone:        String,
  pub notes:        Option<String>,
  pub verified:     bool,
}

impl RawContact {
  /// Column list matching [`RawContact::from_row`].
  pub const COLUMNS: &'static str = "id, created_time, updated_time, status, \
     first_name, last_name, email, phone, notes, verified";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      created_time: row.get(1)?,
      updated_time: row.get(2)?,
      status:       row.get(3)?,
      first_name:   row.get(4)?,
      last_name:    row.get(5)?,
      email:        row.get(6)?,
      phone:        row.get(7)?,
      notes:        row.get(8)?,
      verified:     row.get(9)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:           self.id,
      created_time: decode_dt(&self.created_time)?,
      updated_time: decode_dt(&self.updated_time)?,
      status:       self.status.parse::<Status>()?,
      first_name:   self.first_name,
      last_name:    self.last_name,
      email:        self.email,
      phone:        self.phone,
      notes:        self.notes,
      verified:     self.verified,
    })
  }
}

/// A `restaurants` row as read from SQLite, before decoding.
pub struct RawRestaurant {
  pub id:           i64,
  pub created_time: String,
  pub updated_time: String,
  pub status:       String,
  pub name:         String,
  pub address:      Option<String>,
  pub coordinates:  Option<String>,
  pub phone:        Option<String>,
  pub website:      Option<String>,
  pub description:  Option<String>,
  pub rating:       Option<i64>,
  pub review:       Option<String>,
}

impl RawRestaurant {
  /// Column list matching [`RawRestaurant::from_row`].
  pub const COLUMNS: &'static str = "id, created_time, updated_time, status, \
     name, address, coordinates, phone, website, description, rating, review";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      created_time: row.get(1)?,
      updated_time: row.get(2)?,
      status:       row.get(3)?,
      name:         row.get(4)?,
      address:      row.get(5)?,
      coordinates:  row.get(6)?,
      phone:        row.get(7)?,
      website:      row.get(8)?,
      description:  row.get(9)?,
      rating:       row.get(10)?,
      review:       row.get(11)?,
    })
  }

  pub fn into_restaurant(self) -> Result<Restaurant> {
    let rating = self
      .rating
      .map(|r| {
        u8::try_from(r).map_err(|_| Error::InvalidColumn {
          column: "rating",
          value:  r.to_string(),
        })
      })
      .transpose()?;

    Ok(Restaurant {
      id:           self.id,
      created_time: decode_dt(&self.created_time)?,
      updated_time: decode_dt(&self.updated_time)?,
      status:       self.status.parse::<Status>()?,
      name:         self.name,
      address:      self.address,
      coordinates:  self.coordinates.as_deref().map(decode_coordinates).transpose()?,
      phone:        self.phone,
      website:      self.website,
      description:  self.description,
      rating,
      review:       self.review,
    })
  }
}
