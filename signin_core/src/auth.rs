/// Things that can go wrong in the API
pub mod error;
pub use error::Error;

/// Log into the server
pub mod login;

/// Clients that know how to talk to the login endpoint
pub mod client;
pub use client::{AuthClient, HttpAuthClient};
