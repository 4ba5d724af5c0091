//! Routine signature resolution
//!
//! Turns a routine reference into the ordered list of parameters the catalog
//! reports for it. Nothing is cached: every call asks the catalog again, so a
//! redefined routine is picked up on the next call.

mod catalog;
mod classifier;
mod resolver;


pub use catalog::*;
pub use classifier::*;
pub use resolver::*;
