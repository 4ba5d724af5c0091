//! Routine invocation
//!
//! Resolves a routine's signature from the catalog, binds the caller's
//! arguments to it and hands the call to the execution facility.

mod caller;
mod statement;

#[cfg(test)]
mod tests;

pub use caller::*;
pub use statement::*;
