//! Google API clients.
//!
//! Every call carries an access token obtained through
//! [`oauth::exchange_refresh_token`], except Places, which takes an API key.

pub mod business_profile;
pub mod client;
pub mod gmail;
pub mod oauth;
pub mod places;

pub use business_profile::BusinessProfileApi;
pub use client::GoogleClient;
pub use gmail::GmailMailer;
pub use places::PlacesApi;
