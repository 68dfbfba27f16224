#![allow(unused_imports)]
//! Shared test utilities for integration tests.
//!
//! # Modules
//!
//! - `assertions`: assertion helpers with descriptive failure messages
//! - `fixtures`: canned response bodies and JSON documents
//! - `setup`: resolver/registry construction over a mock transport

pub mod assertions;
pub mod fixtures;
pub mod setup;

pub use assertions::{assert_error_contains, assert_items, assert_ok};
pub use fixtures::{write_json_fixture, NESTED_BODY};
pub use setup::{resolver_for, TestEnv};
