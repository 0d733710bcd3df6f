//! Record status shared by both verticals.
//!
//! Rows are never removed. "Deleting" a record moves it to
//! [`Status::Deleted`]; every list read returns only [`Status::Enabled`] rows.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Lifecycle status of a contact or restaurant row.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
  #[default]
  Enabled,
  Disabled,
  Deleted,
}

impl Status {
  /// The string stored in the `status` column and sent on the wire.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Enabled => "ENABLED",
      Self::Disabled => "DISABLED",
      Self::Deleted => "DELETED",
    }
  }
}

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Status {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "ENABLED" => Ok(Self::Enabled),
      "DISABLED" => Ok(Self::Disabled),
      "DELETED" => Ok(Self::Deleted),
      other => Err(Error::UnknownStatus(other.to_owned())),
    }
  }
}
