//! One module per serverless function. Each exposes `handle(req, config)`;
//! the binaries under `api/` only wire the shared configuration in.

pub mod accounts;
pub mod health;
pub mod leads;
pub mod places;
pub mod reviews;
