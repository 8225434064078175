// tests/watch_to_reload.rs

mod common;
use crate::common::{harness, init_tracing, with_timeout, FakeBehavior, FakeLauncher};

use std::error::Error;
use std::fs;

use tokio::time::{sleep, Duration};

use noticer::engine::task_queue;
use noticer::errors::NoticerError;
use noticer::types::{Priority, Task, TaskRequest};
use noticer::watch::{spawn_watcher, EventBridge, ExtensionFilter, PathEventKind};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn bridge_only_forwards_matching_suffixes() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (tx, mut rx) = task_queue();
    let bridge = EventBridge::new(dir.path(), ExtensionFilter::new([".py", ".toml"]), tx);

    assert!(bridge.on_path_event(&dir.path().join("app.py"), PathEventKind::Modified));
    assert!(!bridge.on_path_event(&dir.path().join("notes.md"), PathEventKind::Created));
    assert!(bridge.on_path_event(&dir.path().join("pkg/Cargo.toml"), PathEventKind::Created));

    assert_eq!(rx.len(), 2);
    assert_eq!(rx.try_dequeue(), Some(TaskRequest::Task(Task::Reload)));
    Ok(())
}

#[test]
fn missing_directory_is_rejected_before_watching() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let (tx, _rx) = task_queue();
    let bridge = EventBridge::new(&missing, ExtensionFilter::any(), tx);

    let err = spawn_watcher(&missing, bridge).unwrap_err();
    assert!(matches!(err, NoticerError::ConfigError(_)));
}

#[tokio::test]
async fn writing_a_watched_file_restarts_the_command() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let h = harness(FakeLauncher::new(FakeBehavior::StopsOnInterrupt));
    let mut state = h.supervisor.state();

    let bridge = EventBridge::new(dir.path(), ExtensionFilter::new([".txt"]), h.tasks.clone());
    let watcher = spawn_watcher(dir.path(), bridge)?;
    let launcher = h.launcher.clone();
    let supervisor = tokio::spawn(h.supervisor.run());

    with_timeout(state.wait_for(|s| *s == noticer::engine::SupervisorState::Active)).await?;
    // Give the backend a moment to register the watch.
    sleep(Duration::from_millis(200)).await;

    fs::write(dir.path().join("ignored.log"), "x")?;
    fs::write(dir.path().join("watched.txt"), "hello")?;

    with_timeout(async {
        while launcher.stats().launches < 2 {
            sleep(Duration::from_millis(20)).await;
        }
    })
    .await;

    h.tasks.enqueue(Priority::STOP, Task::Stop)?;
    let summary = with_timeout(supervisor).await?;
    drop(watcher);

    assert!(summary.launches >= 2);
    assert_eq!(launcher.stats().max_alive, 1);
    Ok(())
}
