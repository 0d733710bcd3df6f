//! Terminal client for the Bitebook API.
//!
//! [`client::ApiClient`] speaks HTTP; [`data::Bitebook`] layers the query
//! cache and mutations on top of it; [`pipeline`] runs the multi-step
//! restaurant save; [`form`] holds the input rules checked before anything
//! is sent; [`views`] renders plain-text tables.

pub mod cache;
pub mod client;
pub mod data;
pub mod form;
pub mod pipeline;
pub mod views;
