//! callsig core - shared abstractions for calling stored routines by name
//!
//! This crate provides the types and traits the routine caller is built on:
//!
//! - `Value` - the closed set of values a routine argument or output can hold
//! - `ParameterDescriptor` / `ParameterRole` - one resolved routine parameter
//! - `RoutineMetadata` / `ParameterCursor` - the catalog metadata facility
//! - `RoutineExecutor` - the facility that actually performs a call
//! - `CallerConfig` - TOML-backed caller settings
//! - `CallsigError` - the error type shared by every crate in the workspace

pub mod config;
mod error;
mod execution;
mod metadata;
pub mod routine;
mod types;

pub use config::CallerConfig;
pub use error::*;
pub use execution::*;
pub use metadata::*;
pub use routine::*;
pub use types::*;
