//! Idempotent logging setup for unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test-captured subscriber once per process.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `"warn"`. Safe to call
/// from every test binary's constructor; later calls do nothing.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Whether [`init`] has run in this process.
pub fn is_initialized() -> bool {
    INITIALIZED.get().is_some()
}
