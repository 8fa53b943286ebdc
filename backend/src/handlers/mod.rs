//! HTTP handlers for the CertTrack API

pub mod certification;
pub mod export;
pub mod health;
pub mod insights;

pub use certification::*;
pub use export::*;
pub use health::*;
pub use insights::*;
