//! Domain layer: alert group models, error types and the ports the
//! representative depends on.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
