//! Request identity types shared across Larder services.
//!
//! Provides the `IdentityHeaders` extractor for gateway-injected principals.

pub mod identity;
