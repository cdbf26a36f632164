//! Prelude module for the jalaali crate.
//!
//! Re-exports commonly used derive macros from derive_more.

pub use derive_more::{Deref, Display, From};
