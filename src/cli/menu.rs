//! Interactive menu shown when no subcommand is given

use anyhow::Result;
use dialoguer::{Input, Select};

use super::{clean, init, list, start, BuildCommand, RunCommand};
use crate::config::Paths;
use crate::runner::SystemRunner;

/// Menu entries, one per CLI verb plus Exit
const CHOICES: [&str; 8] = [
    "🛠   Create new server",
    "▶️  Start server in current directory",
    "🚀  Run server by name",
    "📦  Initialize server",
    "📄  List known servers",
    "🧹  Delete known servers",
    "🎨  Show ASCII banner",
    "❌  Exit",
];

/// Offer one action and execute it; returns the chosen action's exit code
pub async fn run(paths: &Paths) -> Result<i32> {
    let choice = Select::new()
        .with_prompt("Choose an action")
        .items(&CHOICES)
        .default(0)
        .interact()?;

    let runner = SystemRunner;
    match choice {
        0 => {
            let name = prompt_name("Enter new project name")?;
            BuildCommand { name }.execute(&runner).await?;
            Ok(0)
        }
        1 => start::execute(&runner).await,
        2 => {
            let name = prompt_name("Enter server name to run")?;
            RunCommand { name }.execute(paths, &runner).await
        }
        3 => {
            init::execute(paths)?;
            Ok(0)
        }
        4 => {
            list::execute(paths)?;
            Ok(0)
        }
        5 => {
            clean::execute(paths)?;
            Ok(0)
        }
        6 => {
            super::print_banner();
            Ok(0)
        }
        _ => Ok(0),
    }
}

fn prompt_name(prompt: &str) -> Result<String> {
    let name: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("name must not be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(name.trim().to_string())
}
