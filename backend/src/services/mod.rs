//! Business logic services for the CertTrack backend

pub mod certification;
pub mod store;

pub use certification::CertificationService;
pub use store::CertificationStore;
