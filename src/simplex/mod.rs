//! Simplex operations on compositional data.

pub mod closure;

pub use closure::{closure, closure_rows};
