//! Catalog search patterns
//!
//! Metadata search predicates treat `_` as a single-character wildcard, so a
//! routine name like `property_tax` has to be escaped before it can be used
//! to look up its own parameters.

mod translator;

#[cfg(test)]
mod tests;

pub use translator::*;
