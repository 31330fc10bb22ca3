//! Minimart Core - Shared types library.
//!
//! This crate provides the domain types used across Minimart components:
//! - `storefront` - Public-facing storefront site
//! - `integration-tests` - End-to-end test harness
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! HTTP clients, no storage access. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product, cart, and price types with their invariants

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
