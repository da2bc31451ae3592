//! Lumera Core - Shared types library.
//!
//! This crate provides common types used across all Lumera components:
//! - `client` - API access layer for the jewelry-store admin backend
//! - `cli` - Command-line tools for store operators
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, normalized pagination,
//!   and sort order

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
