//! # cactus-domain
//!
//! Pure domain model for the cactus-of-things sensor client.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **wire readings** (the backend's JSON shape) and their
//!   normalization into display-ready **normalized readings**
//! - Define **time scales** (symbolic windows such as "day" or "week") and
//!   resolve them into query intervals, labels, and tick formatters
//! - Provide display helpers shared by every rendering front-end
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod display;
pub mod reading;
pub mod scale;
