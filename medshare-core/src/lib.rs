//! # MedShare Core
//!
//! Core types, errors, and traits for MedShare content-addressed storage.
//!
//! This crate provides the building blocks shared by the pinning client, the
//! HTTP API, and the CLI:
//!
//! - **Types**: content identifiers, credentials, pin records, access statistics
//! - **Errors**: the storage error taxonomy
//! - **Constants**: service endpoints and upload options
//! - **Traits**: the [`ContentStore`] interface
//!
//! ## Example
//!
//! ```rust
//! use medshare_core::{Cid, CidStats};
//!
//! let cid: Cid = "bafkreigh2akiscaildc".parse().unwrap();
//! let stats = CidStats::unavailable(cid, "service unreachable");
//! assert_eq!(stats.estimated_access_count, 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{MedshareError, Result};
pub use traits::*;
pub use types::*;
