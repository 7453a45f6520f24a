//! Core types for Storepoint.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod lang;
pub mod rate;
pub mod status;
pub mod tenant;

pub use id::*;
pub use lang::{LangCode, LangCodeError};
pub use rate::{ManualRate, Rate};
pub use status::ObjectStatus;
pub use tenant::TenantScope;
