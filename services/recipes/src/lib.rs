pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod import;
pub mod infra;
pub mod router;
pub mod state;
pub mod usecase;
