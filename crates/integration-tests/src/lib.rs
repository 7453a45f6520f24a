//! Integration tests for Storepoint.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storepoint-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `engine_resolution` - Full resolution ladder scenarios
//! - `pickup_point_queries` - Selection cache and aggregate queries
//!
//! The scenarios drive the whole ladder (address resolution, catalog lookup,
//! rate filtering, sorting, persistence, selection) through in-memory
//! collaborators; no database or network is required.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fixtures;
