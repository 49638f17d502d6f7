//! # cactus-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** adapters must implement (driven/outbound port):
//!   - `ReadingTransport` — issue one GET against the readings backend
//! - Define the **use-case** the front-ends drive:
//!   - `ReadingFetcher` — race a transport call against a timeout, decode the
//!     body, and normalize every reading
//! - Provide **in-process helpers** that don't need IO (stale-result guard)
//!
//! ## Dependency rule
//! Depends on `cactus-domain` only (plus `tokio` for tasks, channels, and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod error;
pub mod latest_request;
pub mod ports;
pub mod services;
