//! Search Console URL Inspection API client.

mod client;

pub use client::{InspectConfig, InspectError, Inspector};
