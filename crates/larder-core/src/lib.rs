//! Service plumbing shared by Larder services: configuration, health checks,
//! HTTP middleware, tracing setup and sea-orm helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
