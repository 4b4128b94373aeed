//! Core types and trait definitions for the Roster people/role registry.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod lifecycle;
pub mod person;
pub mod role;
pub mod store;

pub use error::{Error, Result};
