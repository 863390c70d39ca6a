//! Shared configuration library for relsweep.
//!
//! Centralizes the assessment configuration document: typed models with
//! defaults, TOML loading, and guard-rail validation. The CLI binary and
//! library consumers share these so defaults and validation rules have a
//! single source of truth.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoadError, ConfigLoader};
pub use models::AssessmentConfig;
pub use validation::validate;
