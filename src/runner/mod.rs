//! External process execution
//!
//! Every external tool the CLI drives (npm, npx, cargo, mkcert, the host
//! package manager) goes through the [`ProcessRunner`] trait, so pipeline
//! ordering and abort conditions are testable with a scripted runner and no
//! real toolchain on the machine.

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tracing::debug;

/// A single external command invocation
#[derive(Debug, Clone)]
pub struct Cmd {
    /// Program name, resolved through PATH
    pub program: String,

    /// Arguments, passed verbatim
    pub args: Vec<String>,

    /// Working directory for the child (inherited when `None`)
    pub cwd: Option<PathBuf>,

    /// Discard the child's stdio instead of inheriting the terminal
    pub quiet: bool,
}

impl Cmd {
    /// Start building an invocation of `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            quiet: false,
        }
    }

    /// Append arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the child in `dir`
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Silence the child; used for version probes
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Result of one external invocation: the exit status when the child ran,
/// or the reason it could not be spawned at all. Consumed immediately by the
/// invoking pipeline to decide continue-or-abort; never persisted.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The child ran; `code` is `None` when it was killed by a signal
    Exited { code: Option<i32> },

    /// The child could not be started at all
    SpawnFailed { error: String },
}

impl Outcome {
    /// Successful completion
    pub fn ok() -> Self {
        Self::Exited { code: Some(0) }
    }

    /// Completion with a specific exit code
    pub fn exit(code: i32) -> Self {
        Self::Exited { code: Some(code) }
    }

    /// Spawn failure with a reason
    pub fn spawn_failed(error: impl Into<String>) -> Self {
        Self::SpawnFailed {
            error: error.into(),
        }
    }

    /// True only for a clean zero exit
    pub fn success(&self) -> bool {
        matches!(self, Self::Exited { code: Some(0) })
    }

    /// Exit code to surface to the parent shell; signal deaths and spawn
    /// failures count as 1
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Exited { code: Some(code) } => *code,
            Self::Exited { code: None } | Self::SpawnFailed { .. } => 1,
        }
    }
}

/// Executes external commands and reports their outcome
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the command and wait for it to finish; the invoking pipeline
    /// stage blocks on this
    async fn run(&self, cmd: &Cmd) -> Outcome;
}

/// Runner backed by real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, cmd: &Cmd) -> Outcome {
        debug!("running: {}", cmd);

        let mut command = system_command(cmd);
        if let Some(dir) = &cmd.cwd {
            command.current_dir(dir);
        }
        if cmd.quiet {
            command
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
        }

        match command.status().await {
            Ok(status) => Outcome::Exited {
                code: status.code(),
            },
            Err(err) => Outcome::spawn_failed(err.to_string()),
        }
    }
}

#[cfg(not(windows))]
fn system_command(cmd: &Cmd) -> tokio::process::Command {
    let mut command = tokio::process::Command::new(&cmd.program);
    command.args(&cmd.args);
    command
}

/// npm, npx and choco are `.cmd` shims on Windows; route through the shell
/// so they resolve the same way they would from a terminal
#[cfg(windows)]
fn system_command(cmd: &Cmd) -> tokio::process::Command {
    let mut command = tokio::process::Command::new("cmd");
    command.arg("/C").arg(&cmd.program).args(&cmd.args);
    command
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_zero_exit_is_success() {
        assert!(Outcome::ok().success());
        assert!(!Outcome::exit(1).success());
        assert!(!Outcome::Exited { code: None }.success());
        assert!(!Outcome::spawn_failed("gone").success());
    }

    #[test]
    fn exit_code_propagation_defaults_to_one() {
        assert_eq!(Outcome::exit(3).exit_code(), 3);
        assert_eq!(Outcome::Exited { code: None }.exit_code(), 1);
        assert_eq!(Outcome::spawn_failed("gone").exit_code(), 1);
    }

    #[test]
    fn command_lines_render_for_logs() {
        let cmd = Cmd::new("npm").args(["install", "concurrently", "--save-dev"]);
        assert_eq!(cmd.to_string(), "npm install concurrently --save-dev");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn system_runner_reports_exit_status() {
        let runner = SystemRunner;
        let ok = runner.run(&Cmd::new("true").quiet()).await;
        assert!(ok.success());

        let fail = runner.run(&Cmd::new("false").quiet()).await;
        assert!(!fail.success());
        assert_eq!(fail.exit_code(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn system_runner_reports_spawn_failure() {
        let runner = SystemRunner;
        let outcome = runner
            .run(&Cmd::new("ripsync-test-no-such-binary").quiet())
            .await;
        assert!(matches!(outcome, Outcome::SpawnFailed { .. }));
    }
}
