//! Test utilities for Larder services.
//!
//! Import in `#[cfg(test)]` blocks and `tests/` only.

pub mod auth;
