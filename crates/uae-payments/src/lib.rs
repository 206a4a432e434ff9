//! Compliance validation for UAE payment instructions.
//!
//! The [`validation`] module holds the rule engine and the purpose-code catalog it consults;
//! the remaining modules carry the service plumbing (configuration, telemetry, errors).

pub mod config;
pub mod error;
pub mod telemetry;
pub mod validation;
