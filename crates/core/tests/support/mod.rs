//! Shared test helpers for `ordertrack-core` integration tests.
//!
//! Provides a scriptable in-memory document store plus record fixtures so
//! the service tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod store;
