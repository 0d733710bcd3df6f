//! Validators for inbound JSON records.
//!
//! Each entry point takes the raw request body and either returns the typed
//! value or a [`ValidationErrors`] listing every offending field. Extra keys
//! are ignored. Absent optional keys and explicit `null` both mean "no value"
//! on create; on a patch, absent means "leave unchanged".

use std::{fmt, ops::RangeInclusive, sync::LazyLock};

use regex::Regex;
use serde_json::{Map, Value};

use crate::{
  contact::NewContact,
  restaurant::{Coordinates, NewRestaurant, RestaurantPatch},
};

pub const NOTES_MAX_CHARS: usize = 1000;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const REVIEW_MAX_CHARS: usize = 2000;
pub const RATING_RANGE: RangeInclusive<u8> = 1..=5;

const EMAIL_PATTERN: &str =
  r"^[A-Za-z0-9_'+.\-]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";

static EMAIL: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern"));

static AU_MOBILE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(?:\+61|0)4(?:[ -]?[0-9]){8}$").expect("mobile pattern")
});

/// Standard address grammar: a dotted local part that neither starts with
/// nor repeats `.`, and a domain ending in an alphabetic TLD.
pub fn is_valid_email(s: &str) -> bool {
  !s.starts_with('.') && !s.contains("..") && EMAIL.is_match(s)
}

/// `+61` or `0`, then `4`, then eight digits optionally separated by single
/// spaces or hyphens.
pub fn is_australian_mobile(s: &str) -> bool { AU_MOBILE.is_match(s) }

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  pub field:   &'static str,
  pub message: String,
}

/// Every field that failed validation, in the order they were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
  errors: Vec<FieldError>,
}

impl ValidationErrors {
  pub fn single(field: &'static str, message: impl Into<String>) -> Self {
    let mut errors = Self::default();
    errors.push(field, message);
    errors
  }

  pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
    self.errors.push(FieldError { field, message: message.into() });
  }

  pub fn is_empty(&self) -> bool { self.errors.is_empty() }

  /// Whether `field` is among the rejected fields.
  pub fn has(&self, field: &str) -> bool {
    self.errors.iter().any(|e| e.field == field)
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, e) in self.errors.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{}: {}", e.field, e.message)?;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationErrors {}

// ─── Record reader ───────────────────────────────────────────────────────────

enum Slot<T> {
  Absent,
  Null,
  Present(T),
  /// Wrong JSON type; an error has already been recorded.
  Invalid,
}

/// Field-by-field reader over a JSON object that accumulates errors.
struct Record<'a> {
  fields: &'a Map<String, Value>,
  errors: ValidationErrors,
}

impl<'a> Record<'a> {
  fn open(input: &'a Value) -> Result<Self, ValidationErrors> {
    match input {
      Value::Object(fields) => Ok(Self { fields, errors: ValidationErrors::default() }),
      _ => Err(ValidationErrors::single("body", "must be a JSON object")),
    }
  }

  fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
    if self.errors.is_empty() { Ok(value) } else { Err(self.errors) }
  }

  fn text(&mut self, field: &'static str) -> Slot<String> {
    match self.fields.get(field) {
      None => Slot::Absent,
      Some(Value::Null) => Slot::Null,
      Some(Value::String(s)) => Slot::Present(s.clone()),
      Some(_) => {
        self.errors.push(field, "must be a string");
        Slot::Invalid
      }
    }
  }

  fn required_text(&mut self, field: &'static str) -> String {
    match self.text(field) {
      Slot::Present(s) if !s.is_empty() => s,
      Slot::Invalid => String::new(),
      _ => {
        self.errors.push(field, "is required");
        String::new()
      }
    }
  }

  /// `None` when absent, `Some(None)` when null.
  fn nullable_text(
    &mut self,
    field: &'static str,
    max_chars: Option<usize>,
  ) -> Option<Option<String>> {
    match self.text(field) {
      Slot::Absent | Slot::Invalid => None,
      Slot::Null => Some(None),
      Slot::Present(s) => {
        if let Some(max) = max_chars
          && s.chars().count() > max
        {
          self.errors.push(field, format!("must be at most {max} characters"));
        }
        Some(Some(s))
      }
    }
  }

  fn nullable_coordinates(&mut self, field: &'static str) -> Option<Option<Coordinates>> {
    match self.fields.get(field) {
      None => None,
      Some(Value::Null) => Some(None),
      Some(Value::Object(pair)) => {
        let lng = pair.get("lng").and_then(Value::as_f64);
        let lat = pair.get("lat").and_then(Value::as_f64);
        match (lng, lat) {
          (Some(lng), Some(lat)) => Some(Some(Coordinates { lng, lat })),
          _ => {
            self.errors.push(field, "must have numeric lng and lat");
            None
          }
        }
      }
      Some(_) => {
        self.errors.push(field, "must be an object or null");
        None
      }
    }
  }

  fn nullable_rating(&mut self, field: &'static str) -> Option<Option<u8>> {
    match self.fields.get(field) {
      None => None,
      Some(Value::Null) => Some(None),
      Some(Value::Number(n)) => {
        let whole = n
          .as_i64()
          .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64));
        match whole.and_then(|v| u8::try_from(v).ok()) {
          Some(v) if RATING_RANGE.contains(&v) => Some(Some(v)),
          _ => {
            self.errors.push(field, "must be a whole number from 1 to 5");
            None
          }
        }
      }
      Some(_) => {
        self.errors.push(field, "must be a number or null");
        None
      }
    }
  }

  fn require_present(&mut self, field: &'static str) {
    if !self.fields.contains_key(field) {
      self.errors.push(field, "is required");
    }
  }
}

// ─── Contacts ────────────────────────────────────────────────────────────────

/// Validate a `POST /contacts` body.
pub fn contact(input: &Value) -> Result<NewContact, ValidationErrors> {
  let mut r = Record::open(input)?;

  let first_name = r.required_text("first_name");
  let last_name = r.required_text("last_name");

  let email = r.required_text("email");
  if !email.is_empty() && !is_valid_email(&email) {
    r.errors.push("email", "invalid email address");
  }

  let phone = r.required_text("phone");
  if !phone.is_empty() && !is_australian_mobile(&phone) {
    r.errors.push("phone", "invalid phone number");
  }

  let notes = r.nullable_text("notes", Some(NOTES_MAX_CHARS)).flatten();

  r.finish(NewContact { first_name, last_name, email, phone, notes })
}

// ─── Restaurants ─────────────────────────────────────────────────────────────

/// Validate a `POST /restaurants` body.
pub fn restaurant(input: &Value) -> Result<NewRestaurant, ValidationErrors> {
  let mut r = Record::open(input)?;

  let name = r.required_text("name");
  let address = r.nullable_text("address", None).flatten();
  let coordinates = r.nullable_coordinates("coordinates").flatten();
  let phone = r.nullable_text("phone", None).flatten();
  let website = r.nullable_text("website", None).flatten();
  let description = r
    .nullable_text("description", Some(DESCRIPTION_MAX_CHARS))
    .flatten();
  let rating = r.nullable_rating("rating").flatten();
  let review = r.nullable_text("review", Some(REVIEW_MAX_CHARS)).flatten();

  r.finish(NewRestaurant {
    name,
    address,
    coordinates,
    phone,
    website,
    description,
    rating,
    review,
  })
}

/// Validate a `PATCH /restaurants/{id}` body. Only keys that are present
/// end up in the patch.
pub fn restaurant_patch(input: &Value) -> Result<RestaurantPatch, ValidationErrors> {
  let mut r = Record::open(input)?;

  let name = match r.text("name") {
    Slot::Absent | Slot::Invalid => None,
    Slot::Present(s) if !s.is_empty() => Some(s),
    Slot::Null | Slot::Present(_) => {
      r.errors.push("name", "must not be empty");
      None
    }
  };

  let patch = RestaurantPatch {
    name,
    address: r.nullable_text("address", None),
    coordinates: r.nullable_coordinates("coordinates"),
    phone: r.nullable_text("phone", None),
    website: r.nullable_text("website", None),
    description: r.nullable_text("description", Some(DESCRIPTION_MAX_CHARS)),
  };
  r.finish(patch)
}

/// Validate a `PATCH /restaurants/{id}/rating` body; `null` clears it.
pub fn rating(input: &Value) -> Result<Option<u8>, ValidationErrors> {
  let mut r = Record::open(input)?;
  r.require_present("rating");
  let rating = r.nullable_rating("rating").flatten();
  r.finish(rating)
}

/// Validate a `PATCH /restaurants/{id}/review` body; `null` clears it.
pub fn review(input: &Value) -> Result<Option<String>, ValidationErrors> {
  let mut r = Record::open(input)?;
  r.require_present("review");
  let review = r.nullable_text("review", Some(REVIEW_MAX_CHARS)).flatten();
  r.finish(review)
}
