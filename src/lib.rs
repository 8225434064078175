// src/lib.rs

pub mod cli;
pub mod config;
pub mod control;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod signals;
pub mod types;
pub mod watch;

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::cli::CliArgs;
use crate::config::{format_duration, load_settings, Settings};
use crate::engine::{task_queue, Supervisor, TaskSender};
use crate::errors::Result;
use crate::exec::{ConsoleStatus, ProcessLauncher, Runner};
use crate::types::{Priority, Task};
use crate::watch::{spawn_watcher, EventBridge};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings (CLI flags + optional config file)
/// - task queue and supervisor
/// - file watcher → event bridge
/// - optional stdin control
/// - SIGINT/SIGTERM handling
///
/// Returns once the supervisor has stopped and the last command invocation
/// has been joined.
pub async fn run(args: CliArgs) -> Result<()> {
    let settings = load_settings(&args)?;

    if args.dry_run {
        print_dry_run(&settings);
        return Ok(());
    }

    let (tasks_tx, tasks_rx) = task_queue();

    let launcher = Arc::new(ProcessLauncher::new(settings.stdin_control));
    let runner = Runner::new(
        settings.command.clone(),
        launcher,
        Arc::new(ConsoleStatus::detect()),
        settings.timing,
    );
    let supervisor = Supervisor::new(runner, tasks_rx);

    // A missing directory fails here, before anything is launched.
    let bridge = EventBridge::new(&settings.directory, settings.filter.clone(), tasks_tx.clone());
    let watcher = spawn_watcher(settings.directory.clone(), bridge)?;

    if settings.stdin_control {
        info!("reading control requests from stdin (reload | stop)");
        crate::control::spawn_stdin_control(tasks_tx.clone())?;
    }

    spawn_shutdown_listener(tasks_tx);

    let summary = supervisor.run().await;

    drop(watcher);
    debug!(?summary, "supervisor summary");
    info!("stopped");
    Ok(())
}

/// On SIGINT/SIGTERM, ask the supervisor to stop ahead of anything queued.
fn spawn_shutdown_listener(tasks: TaskSender) {
    tokio::spawn(async move {
        if let Err(e) = crate::signals::wait_for_shutdown_signal().await {
            error!(error = %e, "failed to listen for shutdown signals");
            return;
        }
        info!("stopping normally");
        if let Err(err) = tasks.enqueue(Priority::STOP, Task::Stop) {
            warn!(error = %err, "supervisor already gone");
        }
        debug!("waiting on runner to stop");
    });
}

/// Simple dry-run output: print the resolved settings.
fn print_dry_run(settings: &Settings) {
    println!("noticer dry-run");
    println!("  directory: {}", settings.directory.display());
    if settings.filter.matches_everything() {
        println!("  extensions: (any)");
    } else {
        println!("  extensions: {:?}", settings.filter.suffixes());
    }
    println!("  command: {}", settings.command);
    println!(
        "  timing: poll {}, grace {}, kill {}",
        format_duration(settings.timing.poll_interval),
        format_duration(settings.timing.grace_period),
        format_duration(settings.timing.kill_timeout)
    );
    if settings.stdin_control {
        println!("  stdin_control: true");
    }

    debug!("dry-run complete (no execution)");
}
