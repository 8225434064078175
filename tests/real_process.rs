// tests/real_process.rs
#![cfg(unix)]

mod common;
use crate::common::{command, init_tracing, with_timeout, RecordingStatus};

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

use noticer::exec::{ProcessLauncher, Runner, Timing};
use noticer::types::{RunOutcome, Verdict};

type TestResult = Result<(), Box<dyn Error>>;

fn sh_runner(script: &str, status: &RecordingStatus, grace: Duration) -> Runner<ProcessLauncher> {
    Runner::new(
        command(&["sh", "-c", script]),
        Arc::new(ProcessLauncher::new(true)),
        Arc::new(status.clone()),
        Timing {
            poll_interval: Duration::from_millis(10),
            grace_period: grace,
            kill_timeout: Duration::from_secs(2),
        },
    )
}

#[tokio::test]
async fn exit_codes_become_verdicts() -> TestResult {
    init_tracing();
    let status = RecordingStatus::new();

    let ok = sh_runner("exit 0", &status, Duration::from_secs(1));
    let failing = sh_runner("exit 7", &status, Duration::from_secs(1));

    assert_eq!(
        with_timeout(ok.run(CancellationToken::new())).await,
        RunOutcome::Exited { code: 0 }
    );
    assert_eq!(
        with_timeout(failing.run(CancellationToken::new())).await,
        RunOutcome::Exited { code: 7 }
    );
    assert_eq!(status.verdicts(), vec![Verdict::Succeeded, Verdict::Failed(7)]);
    Ok(())
}

#[tokio::test]
async fn interrupted_process_stops_within_grace_period() -> TestResult {
    init_tracing();
    let status = RecordingStatus::new();
    let runner = sh_runner("exec sleep 30", &status, Duration::from_secs(2));

    let cancel = CancellationToken::new();
    let run = tokio::spawn({
        let cancel = cancel.clone();
        async move { runner.run(cancel).await }
    });

    sleep(Duration::from_millis(100)).await;
    let started = Instant::now();
    cancel.cancel();

    let outcome = with_timeout(run).await?;
    assert_eq!(outcome, RunOutcome::Interrupted);
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(status.verdicts().is_empty());
    Ok(())
}

#[tokio::test]
async fn process_ignoring_sigint_is_killed_after_grace_period() -> TestResult {
    init_tracing();
    let status = RecordingStatus::new();
    let grace = Duration::from_millis(300);
    let runner = sh_runner("trap '' INT; while true; do sleep 0.05; done", &status, grace);

    let cancel = CancellationToken::new();
    let run = tokio::spawn({
        let cancel = cancel.clone();
        async move { runner.run(cancel).await }
    });

    sleep(Duration::from_millis(100)).await;
    let started = Instant::now();
    cancel.cancel();

    let outcome = with_timeout(run).await?;
    assert_eq!(outcome, RunOutcome::Killed);
    assert!(started.elapsed() >= grace);
    assert!(status.verdicts().is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_program_is_a_launch_failure() -> TestResult {
    init_tracing();
    let status = RecordingStatus::new();
    let runner = Runner::new(
        command(&["noticer-test-no-such-binary"]),
        Arc::new(ProcessLauncher::default()),
        Arc::new(status.clone()),
        Timing::default(),
    );

    let outcome = with_timeout(runner.run(CancellationToken::new())).await;
    assert_eq!(outcome, RunOutcome::LaunchFailed);
    assert!(status.verdicts().is_empty());
    Ok(())
}
