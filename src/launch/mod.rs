//! Build and launch pipeline
//!
//! Four sequential stages run inside a resolved project directory: toolchain
//! check, frontend dependency setup, backend build, then the concurrent
//! launch of both servers under a single supervising `npx concurrently`
//! invocation. Stages are fail-fast; a failed stage leaves whatever it wrote
//! on disk and later stages never run.

use std::path::PathBuf;

use tracing::info;

use crate::error::{Error, Result};
use crate::project::{BACKEND_DIR, FRONTEND_DIR};
use crate::runner::{Cmd, Outcome, ProcessRunner};

/// One stage of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Toolchain,
    Frontend,
    Backend,
    Launch,
}

/// Execution order; the driver stops at the first failing stage
const STAGES: [Stage; 4] = [
    Stage::Toolchain,
    Stage::Frontend,
    Stage::Backend,
    Stage::Launch,
];

/// Drives the four launch stages for one project
pub struct Launcher<'a> {
    project: PathBuf,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Launcher<'a> {
    pub fn new(project: impl Into<PathBuf>, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            project: project.into(),
            runner,
        }
    }

    /// Run every stage in order and hand both servers to the supervisor.
    ///
    /// Blocks until the supervisor exits; its exit code is returned so the
    /// dispatcher can surface it as the tool's own.
    pub async fn launch(&self) -> Result<i32> {
        info!("launching {}", self.project.display());
        let mut code = 0;
        for stage in STAGES {
            code = self.run_stage(stage).await?;
        }
        Ok(code)
    }

    /// Only the final stage produces a meaningful exit code
    async fn run_stage(&self, stage: Stage) -> Result<i32> {
        match stage {
            Stage::Toolchain => self.ensure_toolchain().await.map(|()| 0),
            Stage::Frontend => self.ensure_frontend().await.map(|()| 0),
            Stage::Backend => self.build_backend().await.map(|()| 0),
            Stage::Launch => self.start_servers().await,
        }
    }

    /// Stage 1: cargo must answer a version probe
    async fn ensure_toolchain(&self) -> Result<()> {
        let probe = Cmd::new("cargo").args(["--version"]).quiet();
        if !self.runner.run(&probe).await.success() {
            return Err(Error::ToolchainMissing {
                tool: "cargo".to_string(),
            });
        }
        Ok(())
    }

    /// Stage 2: frontend folder must exist, its packages installed, and the
    /// concurrency helper available
    async fn ensure_frontend(&self) -> Result<()> {
        let frontend = self.project.join(FRONTEND_DIR);
        if !frontend.is_dir() {
            return Err(Error::missing("frontend folder", &frontend));
        }

        println!("📦 Installing frontend packages...");
        let install = Cmd::new("npm").args(["install"]).cwd(&frontend);
        if !self.runner.run(&install).await.success() {
            return Err(Error::install("frontend dependencies"));
        }

        let probe = Cmd::new("npx")
            .args(["concurrently", "--version"])
            .cwd(&frontend)
            .quiet();
        if !self.runner.run(&probe).await.success() {
            println!("📦 Installing 'concurrently'...");
            let install = Cmd::new("npm")
                .args(["install", "concurrently", "--save-dev"])
                .cwd(&frontend);
            if !self.runner.run(&install).await.success() {
                return Err(Error::install("concurrently"));
            }
        }
        Ok(())
    }

    /// Stage 3: always rebuild, never reuse a stale artifact
    async fn build_backend(&self) -> Result<()> {
        println!("🔧 Building backend...");
        let build = Cmd::new("cargo")
            .args(["build"])
            .cwd(self.project.join(BACKEND_DIR));
        if !self.runner.run(&build).await.success() {
            return Err(Error::BuildFailed);
        }
        Ok(())
    }

    /// Stage 4: both servers under one supervisor, terminal inherited.
    ///
    /// concurrently runs each command string through its own shell, so the
    /// `cd && run` compounds stay single arguments here.
    async fn start_servers(&self) -> Result<i32> {
        println!("🚀 Starting backend and frontend...");
        let backend = self.project.join(BACKEND_DIR);
        let frontend = self.project.join(FRONTEND_DIR);
        let supervisor = Cmd::new("npx").args([
            "concurrently".to_string(),
            format!("cd '{}' && cargo run", backend.display()),
            format!("cd '{}' && npm run network", frontend.display()),
        ]);

        match self.runner.run(&supervisor).await {
            Outcome::SpawnFailed { .. } => Err(Error::LaunchFailed),
            outcome => Ok(outcome.exit_code()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::runner::fake::FakeRunner;

    fn project_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(BACKEND_DIR)).unwrap();
        fs::create_dir_all(dir.path().join(FRONTEND_DIR)).unwrap();
        dir
    }

    /// Fails any command whose rendered line contains `needle`
    fn failing_on(needle: &'static str) -> FakeRunner {
        FakeRunner::with(move |cmd| {
            if cmd.to_string().contains(needle) {
                Outcome::exit(1)
            } else {
                Outcome::ok()
            }
        })
    }

    #[tokio::test]
    async fn stages_run_in_order() {
        let dir = project_dir();
        let runner = FakeRunner::ok();

        let code = Launcher::new(dir.path(), &runner).launch().await.unwrap();

        assert_eq!(code, 0);
        let calls = runner.calls();
        assert_eq!(calls[0], "cargo --version");
        assert_eq!(calls[1], "npm install");
        assert_eq!(calls[2], "npx concurrently --version");
        assert_eq!(calls[3], "cargo build");
        assert!(calls[4].starts_with("npx concurrently cd '"));
        assert!(calls[4].contains("cargo run"));
        assert!(calls[4].contains("npm run network"));
    }

    #[tokio::test]
    async fn missing_cargo_stops_the_pipeline_first() {
        let dir = project_dir();
        let runner = failing_on("cargo --version");

        let err = Launcher::new(dir.path(), &runner).launch().await.unwrap_err();

        assert!(matches!(err, Error::ToolchainMissing { tool } if tool == "cargo"));
        assert_eq!(runner.calls().len(), 1);
    }

    #[tokio::test]
    async fn missing_frontend_folder_is_structural() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(BACKEND_DIR)).unwrap();
        let runner = FakeRunner::ok();

        let err = Launcher::new(dir.path(), &runner).launch().await.unwrap_err();

        assert!(matches!(err, Error::MissingComponent { .. }));
        assert!(!runner.invoked("npm install"));
    }

    #[tokio::test]
    async fn failed_install_never_reaches_the_build() {
        let dir = project_dir();
        let runner = failing_on("npm install");

        let err = Launcher::new(dir.path(), &runner).launch().await.unwrap_err();

        assert!(matches!(err, Error::InstallFailed { .. }));
        assert!(!runner.invoked("cargo build"));
    }

    #[tokio::test]
    async fn failed_concurrently_probe_installs_it() {
        let dir = project_dir();
        let runner = failing_on("concurrently --version");

        let code = Launcher::new(dir.path(), &runner).launch().await.unwrap();

        assert_eq!(code, 0);
        assert!(runner.invoked("npm install concurrently --save-dev"));
    }

    #[tokio::test]
    async fn failed_concurrently_install_aborts() {
        let dir = project_dir();
        let runner = FakeRunner::with(|cmd| {
            let line = cmd.to_string();
            if line.contains("concurrently --version") || line.contains("--save-dev") {
                Outcome::exit(1)
            } else {
                Outcome::ok()
            }
        });

        let err = Launcher::new(dir.path(), &runner).launch().await.unwrap_err();

        assert!(matches!(err, Error::InstallFailed { what } if what == "concurrently"));
        assert!(!runner.invoked("cargo build"));
    }

    #[tokio::test]
    async fn failed_build_never_launches() {
        let dir = project_dir();
        let runner = failing_on("cargo build");

        let err = Launcher::new(dir.path(), &runner).launch().await.unwrap_err();

        assert!(matches!(err, Error::BuildFailed));
        assert!(!runner.invoked("cargo run"));
    }

    #[tokio::test]
    async fn supervisor_spawn_failure_is_launch_failed() {
        let dir = project_dir();
        let runner = FakeRunner::with(|cmd| {
            if cmd.to_string().contains("cargo run") {
                Outcome::spawn_failed("npx not found")
            } else {
                Outcome::ok()
            }
        });

        let err = Launcher::new(dir.path(), &runner).launch().await.unwrap_err();
        assert!(matches!(err, Error::LaunchFailed));
    }

    #[tokio::test]
    async fn supervisor_exit_code_is_propagated() {
        let dir = project_dir();
        let runner = FakeRunner::with(|cmd| {
            if cmd.to_string().contains("cargo run") {
                Outcome::exit(3)
            } else {
                Outcome::ok()
            }
        });

        let code = Launcher::new(dir.path(), &runner).launch().await.unwrap();
        assert_eq!(code, 3);
    }
}
