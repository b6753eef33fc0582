//! Blocking Jenkins client.

pub mod blocking_client;

pub use blocking_client::{Client, ClientBuilder};
