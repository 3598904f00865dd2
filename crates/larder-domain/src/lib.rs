//! Domain types shared across Larder crates.
//!
//! Pure types and rules with no framework dependencies. Safe to import from
//! `domain/` and `usecase/` layers of any service.

pub mod pagination;
pub mod recipe;
pub mod tag;
pub mod user;
