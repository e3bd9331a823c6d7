//! # Tests Module
//!
//! Crate-level tests for twextract. Unit tests for individual helpers live
//! next to the code they test; this module covers behaviour that spans
//! modules.
//!
//! ## Test Categories
//!
//! ### Extraction Tests
//! - Every per-resource extractor against captured response fixtures
//! - Not-found, shape-drift and pagination edge cases
//!
//! ### Integration Tests
//! - HTTP endpoint testing for all routes through an in-memory fetcher
//! - Request/response validation and error mapping
//! - Server configuration (`get_server_port`)
//!
//! ## Test Environment
//!
//! No test touches the network. Fixtures under `fixtures/` are compiled in
//! with `include_str!`.

mod fixtures;
