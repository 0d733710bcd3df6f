//! Core types and trait definitions for Bitebook.
//!
//! Two verticals live here: contact requests and tracked restaurants. This
//! crate holds their records, the validators for inbound JSON, the
//! repository traits storage backends implement, and the thin services the
//! HTTP layer calls. It has no HTTP or database dependencies.

pub mod contact;
pub mod error;
pub mod restaurant;
pub mod service;
pub mod status;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
pub use status::Status;
