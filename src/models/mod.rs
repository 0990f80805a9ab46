//! Request-scoped data shapes for the widget and quiz endpoints.
//!
//! Upstream wire types that only one client needs stay next to that client.

pub mod account;
pub mod lead;
pub mod place;
pub mod review;
