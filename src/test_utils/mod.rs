//! Test utilities for platepipe
//!
//! Helpers shared by unit tests and, through the `test-utils` feature, by the
//! integration tests:
//! - one-time tracing setup for tests
//! - scratch directories with sample documents, templates and variable files
//!
//! # Example
//!
//! ```rust,no_run
//! use platepipe::test_utils::{SourceFixture, TestEnvironment};
//!
//! let env = TestEnvironment::new().unwrap();
//! let doc = env.add_fixture(&SourceFixture::markdown_document()).unwrap();
//! let page = env.add_fixture(&SourceFixture::html_template()).unwrap();
//! ```

pub mod environment;
pub mod fixtures;

pub use environment::TestEnvironment;
pub use fixtures::SourceFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise
/// `RUST_LOG`; without either, tests run without a subscriber.
///
/// ```rust,no_run
/// use tracing::Level;
///
/// platepipe::test_utils::init_test_logging(Some(Level::DEBUG));
/// ```
///
/// To enable logging in tests via environment variable:
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
