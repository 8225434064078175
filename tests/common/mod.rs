#![allow(dead_code)]

use std::sync::Arc;

use noticer::engine::{task_queue, Supervisor, TaskSender};
use noticer::exec::Runner;
use noticer::types::CommandSpec;
pub use noticer_test_utils::{
    fast_timing, init_tracing, with_timeout, FakeBehavior, FakeLauncher, FakeStats,
    RecordingStatus,
};

/// A supervisor over a fake launcher, plus everything a test needs to drive
/// and inspect it.
pub struct Harness {
    pub supervisor: Supervisor<FakeLauncher>,
    pub tasks: TaskSender,
    pub launcher: FakeLauncher,
    pub status: RecordingStatus,
}

pub fn harness(launcher: FakeLauncher) -> Harness {
    let status = RecordingStatus::new();
    let (tasks, receiver) = task_queue();
    let runner = Runner::new(
        command(&["make", "test"]),
        Arc::new(launcher.clone()),
        Arc::new(status.clone()),
        fast_timing(),
    );

    Harness {
        supervisor: Supervisor::new(runner, receiver),
        tasks,
        launcher,
        status,
    }
}

pub fn command(argv: &[&str]) -> CommandSpec {
    CommandSpec::new(argv.iter().copied()).expect("valid command")
}
