use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use noticer::exec::{BoxFuture, ChildProcess, Launcher};
use noticer::types::CommandSpec;

/// How a fake child behaves once launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeBehavior {
    /// Exits on its own with `code` once it has been polled `after_polls`
    /// times (0 = already exited at the first poll).
    ExitsWith { code: i32, after_polls: usize },
    /// Runs until interrupted, then exits within the grace period.
    StopsOnInterrupt,
    /// Ignores interrupts; only a kill stops it.
    IgnoresInterrupt,
    /// `launch` itself fails.
    FailsToLaunch,
}

/// Counters shared between a [`FakeLauncher`] and its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeStats {
    /// Calls to `launch`, including failed ones.
    pub launches: usize,
    pub interrupts: usize,
    pub kills: usize,
    /// Interrupts delivered to a child that had already exited.
    pub interrupts_after_exit: usize,
    /// Children whose handle is currently alive.
    pub alive: usize,
    /// Highest value `alive` ever reached.
    pub max_alive: usize,
    /// Commands passed to `launch`, in order.
    pub commands: Vec<Vec<String>>,
}

/// Launcher that hands out scripted children instead of OS processes.
///
/// Behaviours are taken from the script in order; once it is exhausted every
/// launch uses the default behaviour.
#[derive(Debug, Clone)]
pub struct FakeLauncher {
    script: Arc<Mutex<VecDeque<FakeBehavior>>>,
    default: FakeBehavior,
    stats: Arc<Mutex<FakeStats>>,
}

impl FakeLauncher {
    pub fn new(default: FakeBehavior) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            default,
            stats: Arc::new(Mutex::new(FakeStats::default())),
        }
    }

    /// Queue behaviours for the next launches.
    pub fn with_script(self, behaviors: impl IntoIterator<Item = FakeBehavior>) -> Self {
        self.script.lock().unwrap().extend(behaviors);
        self
    }

    pub fn stats(&self) -> FakeStats {
        self.stats.lock().unwrap().clone()
    }

    fn next_behavior(&self) -> FakeBehavior {
        self.script.lock().unwrap().pop_front().unwrap_or(self.default)
    }
}

impl Launcher for FakeLauncher {
    fn launch(&self, command: &CommandSpec) -> anyhow::Result<Box<dyn ChildProcess>> {
        let behavior = self.next_behavior();
        {
            let mut stats = self.stats.lock().unwrap();
            stats.launches += 1;
            stats.commands.push(command.argv().to_vec());
        }

        if behavior == FakeBehavior::FailsToLaunch {
            anyhow::bail!("Bang!");
        }

        {
            let mut stats = self.stats.lock().unwrap();
            stats.alive += 1;
            stats.max_alive = stats.max_alive.max(stats.alive);
        }

        Ok(Box::new(FakeChild {
            behavior,
            polls: 0,
            exit_code: None,
            interrupted: false,
            killed: false,
            stats: Arc::clone(&self.stats),
        }))
    }
}

struct FakeChild {
    behavior: FakeBehavior,
    polls: usize,
    exit_code: Option<i32>,
    interrupted: bool,
    killed: bool,
    stats: Arc<Mutex<FakeStats>>,
}

impl FakeChild {
    fn stats(&self) -> MutexGuard<'_, FakeStats> {
        self.stats.lock().unwrap()
    }

    fn settle(&mut self) -> Option<i32> {
        if self.exit_code.is_some() {
            return self.exit_code;
        }
        let stopped = match self.behavior {
            _ if self.killed => true,
            FakeBehavior::StopsOnInterrupt | FakeBehavior::ExitsWith { .. } => self.interrupted,
            FakeBehavior::IgnoresInterrupt | FakeBehavior::FailsToLaunch => false,
        };
        if stopped {
            self.exit_code = Some(-1);
        }
        self.exit_code
    }
}

impl ChildProcess for FakeChild {
    fn id(&self) -> Option<u32> {
        self.exit_code.is_none().then_some(4242)
    }

    fn try_exit_code(&mut self) -> anyhow::Result<Option<i32>> {
        if let FakeBehavior::ExitsWith { code, after_polls } = self.behavior {
            if self.exit_code.is_none() && self.polls >= after_polls {
                self.exit_code = Some(code);
            }
        }
        self.polls += 1;
        Ok(self.settle())
    }

    fn interrupt(&mut self) -> anyhow::Result<()> {
        let already_exited = self.exit_code.is_some();
        let mut stats = self.stats();
        stats.interrupts += 1;
        if already_exited {
            stats.interrupts_after_exit += 1;
        }
        drop(stats);
        self.interrupted = true;
        Ok(())
    }

    fn wait_for(&mut self, _limit: Duration) -> BoxFuture<'_, anyhow::Result<Option<i32>>> {
        let code = self.settle();
        Box::pin(async move {
            tokio::task::yield_now().await;
            Ok(code)
        })
    }

    fn kill(&mut self) -> anyhow::Result<()> {
        self.stats().kills += 1;
        self.killed = true;
        Ok(())
    }
}

impl Drop for FakeChild {
    fn drop(&mut self) {
        if let Ok(mut stats) = self.stats.lock() {
            stats.alive -= 1;
        }
    }
}
