//! Integration test suite for platepipe
//!
//! End-to-end tests running the compiled binary against temporary documents,
//! templates and variable files.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: argument handling, help and exit codes
//! - **pipeline**: rendering, variable priority, escaping and error reporting

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod pipeline;
