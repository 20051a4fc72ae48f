//! Integration tests exercising `TrackedMap` through its public API.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for all integration tests.
///
/// Set `RUST_LOG=tracked_map=trace` to see dirty-set transitions.
#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

mod row;
mod walkthrough;
