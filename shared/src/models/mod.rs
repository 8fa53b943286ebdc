//! Domain models for the CertTrack platform

pub mod certification;

pub use certification::*;
