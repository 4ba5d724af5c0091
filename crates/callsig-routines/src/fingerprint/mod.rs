//! Statement fingerprints
//!
//! Computes the 13 character statement identifier Oracle reports as
//! `V$SQL.SQL_ID`, so statements issued by this crate can be found in the
//! database's own views and traces.

mod sql_id;


pub use sql_id::*;
