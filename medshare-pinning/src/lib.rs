//! Pinata client for storing and retrieving MedShare content.
//!
//! Uploads go through the pinning REST API; retrieval goes through the
//! public gateway, falling back to the API to confirm the pin.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod config;
mod upload;

pub use client::PinataClient;
pub use config::PinataConfig;
pub use medshare_core::ContentStore;
pub use upload::read_file_upload;
