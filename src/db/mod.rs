//! Database access layer

pub mod appointments;
pub mod availability;
pub mod professionals;
pub mod services;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;
