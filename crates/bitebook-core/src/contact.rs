//! Contact requests submitted through the "contact us" form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Status;

/// A stored contact request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
  pub id:           i64,
  /// Set once at insert.
  pub created_time: DateTime<Utc>,
  /// Refreshed by every mutating operation.
  pub updated_time: DateTime<Utc>,
  pub status:       Status,
  pub first_name:   String,
  pub last_name:    String,
  pub email:        String,
  /// Australian mobile number, stored as submitted.
  pub phone:        String,
  pub notes:        Option<String>,
  /// Set by an explicit verify action, never on creation.
  pub verified:     bool,
}

impl Contact {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

/// Input to [`crate::store::ContactRepository::create_contact`].
///
/// `id`, timestamps, `status` and `verified` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContact {
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub phone:      String,
  pub notes:      Option<String>,
}
