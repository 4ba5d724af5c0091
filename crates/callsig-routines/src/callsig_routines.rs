//! callsig routines - call stored routines by name
//!
//! This crate provides:
//! - Search pattern escaping for routine references
//! - Signature resolution from catalog metadata
//! - Positional and named argument binding
//! - A generic caller tying the above to an execution facility
//! - Oracle-compatible `SQL_ID` statement fingerprints

pub mod binding;
pub mod fingerprint;
pub mod invoke;
pub mod pattern;
pub mod signature;

#[cfg(test)]
mod test_support;

pub use binding::*;
pub use fingerprint::*;
pub use invoke::*;
pub use pattern::*;
pub use signature::*;
