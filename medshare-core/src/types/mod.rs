//! Domain types for MedShare.
//!
//! - [`Cid`]: content identifier naming immutable stored content
//! - [`Credentials`]: API key pair or bearer token for the pinning service
//! - [`PinRecord`]: metadata the pinning service keeps per stored object
//! - [`CidStats`]: pin metadata plus the estimated access count
//! - [`Content`] / [`FileUpload`]: retrieved and uploaded payloads

mod cid;
mod content;
mod credentials;
mod pin;
mod stats;

pub use cid::*;
pub use content::*;
pub use credentials::*;
pub use pin::*;
pub use stats::*;
