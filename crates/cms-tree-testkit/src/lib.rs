//! # CMS Tree Testkit
//!
//! Shared test infrastructure for the tree state engine.
//!
//! - [`MockTreeService`]: in-memory remote data client that records every
//!   call, can fail chosen requests and can hold a fetch in flight
//! - [`fixtures`]: DTO builders and a small seeded media tree
//! - [`init_test_tracing`]: tracing subscriber for test output

#![forbid(unsafe_code)]

/// DTO builders and seeded trees
pub mod fixtures;

/// Tracing setup for tests
pub mod logging;

/// Mock remote tree service
pub mod mock_service;

pub use fixtures::{folder, leaf, media_tree, parent_path};
pub use logging::init_test_tracing;
pub use mock_service::{FetchGate, MockTreeService, ServiceCall};
