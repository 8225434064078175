use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// A request for the supervisor loop.
///
/// - `Reload`: stop the running command (if any) and start it again.
/// - `Stop`: stop the running command (if any) and end the supervisor loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Reload,
    Stop,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Reload => f.write_str("reload"),
            Task::Stop => f.write_str("stop"),
        }
    }
}

impl FromStr for Task {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reload" | "r" => Ok(Task::Reload),
            "stop" | "q" => Ok(Task::Stop),
            other => Err(format!(
                "invalid task: {other:?} (expected \"reload\" or \"stop\")"
            )),
        }
    }
}

/// Anything that can sit on the task queue.
///
/// Text that does not name a [`Task`] is still delivered so the supervisor
/// can report it; it never changes supervisor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRequest {
    Task(Task),
    Unrecognized(String),
}

impl TaskRequest {
    /// Parse user-supplied text into a request, keeping unknown text verbatim.
    pub fn parse(text: &str) -> Self {
        match text.parse::<Task>() {
            Ok(task) => TaskRequest::Task(task),
            Err(_) => TaskRequest::Unrecognized(text.to_string()),
        }
    }
}

impl From<Task> for TaskRequest {
    fn from(task: Task) -> Self {
        TaskRequest::Task(task)
    }
}

/// Queue ordering key. Lower values are served first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Priority(pub u32);

impl Priority {
    /// Shutdown requests overtake everything else.
    pub const STOP: Priority = Priority(0);
    /// Requests typed by the user on stdin.
    pub const MANUAL: Priority = Priority(10);
    /// Reloads coming from the filesystem watcher.
    pub const FILE_CHANGE: Priority = Priority(100);
}

impl From<u32> for Priority {
    fn from(value: u32) -> Self {
        Priority(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The command being supervised: program name followed by its arguments.
///
/// Always non-empty; construct it with [`CommandSpec::new`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct CommandSpec {
    argv: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(argv: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        match argv.first() {
            None => Err("command must not be empty".to_string()),
            Some(program) if program.trim().is_empty() => {
                Err("command program name must not be blank".to_string())
            }
            Some(_) => Ok(Self { argv }),
        }
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}

impl TryFrom<Vec<String>> for CommandSpec {
    type Error = String;

    fn try_from(argv: Vec<String>) -> Result<Self, Self::Error> {
        CommandSpec::new(argv)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.argv.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if part.is_empty() || part.contains(char::is_whitespace) {
                write!(f, "{part:?}")?;
            } else {
                f.write_str(part)?;
            }
        }
        Ok(())
    }
}

/// Verdict for a command that exited on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Succeeded,
    Failed(i32),
}

impl Verdict {
    pub fn from_exit_code(code: i32) -> Self {
        if code == 0 {
            Verdict::Succeeded
        } else {
            Verdict::Failed(code)
        }
    }
}

/// How a single runner invocation ended.
///
/// Only `Exited` carries a verdict; a command that was interrupted or killed
/// on purpose has no meaningful success/failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The process could not be started.
    LaunchFailed,
    /// The process exited on its own with this code (`-1` if it had none).
    Exited { code: i32 },
    /// The process exited within the grace period after being interrupted.
    Interrupted,
    /// The process ignored the interrupt and was killed.
    Killed,
    /// Monitoring failed unexpectedly.
    Aborted,
}

impl RunOutcome {
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            RunOutcome::Exited { code } => Some(Verdict::from_exit_code(*code)),
            _ => None,
        }
    }
}
