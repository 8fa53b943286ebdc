//! Shared types and domain logic for the CertTrack platform
//!
//! This crate contains the pure certification-tracking core shared between
//! the backend and the browser dashboard (via WASM): record models, field
//! normalization, expiry derivation, filtering/aggregation, and the CSV and
//! iCalendar export encoders.

pub mod expiry;
pub mod export;
pub mod insights;
pub mod models;
pub mod normalize;

pub use expiry::*;
pub use export::*;
pub use insights::*;
pub use models::*;
pub use normalize::*;
