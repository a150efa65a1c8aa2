//! Command-line interface for RipSync
//!
//! Provides the main CLI structure using clap with subcommands for:
//! - `build`: scaffold a new server
//! - `start` / `run`: launch a server
//! - `init` / `list` / `clean`: manage the registry
//!
//! Invoked with no subcommand the tool drops into the interactive menu, and
//! the very first invocation shows the onboarding banner first, whatever
//! arguments were given.

mod build;
mod clean;
mod init;
mod list;
mod menu;
mod run;
mod start;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{self, FirstRun, Paths};
use crate::runner::SystemRunner;

pub use build::BuildCommand;
pub use run::RunCommand;

/// 📡 RipSync – P2P file sharing CLI
#[derive(Parser, Debug)]
#[command(name = "ripsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new server
    Build(BuildCommand),

    /// Start the server in the current directory
    ///
    /// Must be in the root directory of the server
    Start,

    /// Run a server by name from anywhere
    ///
    /// Globally executable
    Run(RunCommand),

    /// List all known servers
    List,

    /// Remove all known servers
    Clean,

    /// Register and move this project to ~/ripsync-servers/<server>
    ///
    /// Makes it globally executable with the 'run' command. Must be in the
    /// root directory of the server
    Init,

    /// Print the RipSync ASCII banner art
    Ascii,
}

/// Top-level entry: first-run gate, then argument dispatch or the menu.
///
/// Returns the process exit code; `start`/`run` hand back the launch
/// supervisor's own status.
pub async fn run() -> Result<i32> {
    let paths = Paths::from_system();

    // The first invocation ever ignores its arguments entirely: banner,
    // marker write, then the menu, in that order. A crash inside the menu
    // must not re-trigger onboarding, a crash before the marker write must.
    if FirstRun::load(&paths).is_first() {
        init_tracing(false);
        print_banner();
        config::mark_as_run(&paths);
        return menu::run(&paths).await;
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        None => menu::run(&paths).await,
        Some(command) => dispatch(command, &paths).await,
    }
}

async fn dispatch(command: &Commands, paths: &Paths) -> Result<i32> {
    let runner = SystemRunner;
    match command {
        Commands::Build(cmd) => {
            cmd.execute(&runner).await?;
            Ok(0)
        }
        Commands::Start => start::execute(&runner).await,
        Commands::Run(cmd) => cmd.execute(paths, &runner).await,
        Commands::List => {
            list::execute(paths)?;
            Ok(0)
        }
        Commands::Clean => {
            clean::execute(paths)?;
            Ok(0)
        }
        Commands::Init => {
            init::execute(paths)?;
            Ok(0)
        }
        Commands::Ascii => {
            print_banner();
            Ok(0)
        }
    }
}

/// Initialize the logging/tracing system
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ripsync=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ripsync=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

const BANNER: &str = r"
           d8,
           8P

  88bd88b  88b?88,.d88b, .d888b,?88   d8P   88bd88b  d8888b
  88P'     88P ?88'  ?88 ?8b,   d88   88    88P' ?8bd8P'  P
 d88      d88   88b  d8P    ?8b ?8(  d88   d88   800813
d88'     d88'   888888P' ?888P'  ?88P'?8b d88'   88b ?888P'
                88P'                   )88
               d88                    ,d8P
               ?8P                  ?888P'
";

/// Print the RipSync banner and welcome lines
fn print_banner() {
    println!("{BANNER}");
    println!(
        "💾  HI! Welcome to {} – P2P file sharing, simplified.\n",
        "RipSync".blue()
    );
    println!("👉  Build a Rip server!");
    println!(
        "👉  Or Exit and type {} for all commands\n",
        "ripsync --help".underline()
    );
}
