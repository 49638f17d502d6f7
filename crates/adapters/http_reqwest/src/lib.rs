//! # cactus-adapter-http-reqwest
//!
//! HTTP adapter built on [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the `ReadingTransport` port defined in `cactus-app::ports`
//! - Turn a `ReadingRequest` into a GET against the configured endpoint
//! - Map transport failures and non-2xx statuses into `TransportError`
//!
//! ## Dependency rule
//! Depends on `cactus-app` (for the port trait). The `app` and `domain`
//! crates must never reference this adapter, and no reqwest type leaks
//! through the port.

pub mod config;
pub mod error;
pub mod transport;

pub use config::BackendConfig;
pub use error::HttpError;
pub use transport::{DEFAULT_REQUEST_TIMEOUT, HttpTransport, validate_endpoint};
