pub mod fake_launcher;
pub mod recording_status;

pub use fake_launcher::{FakeBehavior, FakeLauncher, FakeStats};
pub use recording_status::RecordingStatus;

use std::sync::Once;
use std::time::Duration;

use noticer::exec::Timing;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Output is captured per-test and only shown for failing tests unless run
/// with `--nocapture`. Levels come from `RUST_LOG`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Timings short enough to keep supervisor tests fast.
pub fn fast_timing() -> Timing {
    Timing {
        poll_interval: Duration::from_millis(5),
        grace_period: Duration::from_millis(50),
        kill_timeout: Duration::from_millis(50),
    }
}

/// Run a future with a 5-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}
