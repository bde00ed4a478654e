//! Chainring Core - Shared types library.
//!
//! This crate provides common types used across all Chainring components:
//! - `server` - REST backend for the catalog and authentication
//! - `client` - Browser-side catalog cache, cart, and checkout logic
//! - `cli` - Command-line tools for migrations and catalog import
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Identifiers, emails, catalog documents, and wire payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
