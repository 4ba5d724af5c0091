//! Argument binding
//!
//! Shapes a caller's loosely keyed argument map into the positional or named
//! arguments the execution facility expects.

mod binder;


pub use binder::*;
