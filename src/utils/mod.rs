//! Utility functions and helpers.

pub mod color;

#[cfg(test)]
pub(crate) use color::strip_ansi;
pub use color::{paint, Color};
