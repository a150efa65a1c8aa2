//! Environment setup for a scaffolded project
//!
//! Collects network settings, makes sure `mkcert` is available, generates
//! TLS certificates for both halves of the project, and writes the env files
//! the backend and frontend read at startup. External tools run through the
//! [`ProcessRunner`] and the install-consent question is an injected hook,
//! so the pipeline is testable without a terminal or the real mkcert.

use std::fs;
use std::net::Ipv4Addr;
use std::path::Path;

use dialoguer::{Confirm, Input};
use tracing::info;

use crate::error::{Error, Result};
use crate::project::{BACKEND_DIR, FRONTEND_DIR};
use crate::runner::{Cmd, ProcessRunner};

/// Certificate and key filenames mkcert is asked to produce
const CERT_FILE: &str = "cert.pem";
const KEY_FILE: &str = "key.pem";

/// Network settings for one scaffolded project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    /// LAN address peers connect to
    pub ip: Ipv4Addr,

    /// Port the frontend static server listens on
    pub frontend_port: u16,

    /// Port the backend WebSocket server listens on
    pub backend_port: u16,
}

/// Ask the user for the project's network settings.
///
/// Each answer is validated before the next question; dialoguer re-prompts
/// until the input parses.
pub fn prompt_network_config() -> Result<NetworkConfig> {
    let ip: Ipv4Addr = Input::new()
        .with_prompt("Enter server IP (e.g. 192.168.1.100)")
        .validate_with(|input: &String| match input.parse::<Ipv4Addr>() {
            Ok(_) => Ok(()),
            Err(_) => Err("enter a valid IPv4 address"),
        })
        .interact_text()?
        .parse()
        .map_err(|_| Error::setup("invalid IP address"))?;

    let frontend_port = prompt_port("Enter frontend port (e.g. 3000)")?;
    let backend_port = prompt_port("Enter backend port (e.g. 8000)")?;

    Ok(NetworkConfig {
        ip,
        frontend_port,
        backend_port,
    })
}

fn prompt_port(prompt: &str) -> Result<u16> {
    let port: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| match input.parse::<u16>() {
            Ok(port) if port >= 1 => Ok(()),
            _ => Err("enter a port between 1 and 65535"),
        })
        .interact_text()?;
    port.parse().map_err(|_| Error::setup("invalid port"))
}

/// Run the setup pipeline inside `project`: mkcert availability, certificate
/// generation for both components, then the env files.
///
/// `consent` is only invoked when mkcert is missing; interactive callers
/// pass [`confirm_mkcert_install`].
pub async fn run<F>(
    project: &Path,
    net: &NetworkConfig,
    runner: &dyn ProcessRunner,
    consent: F,
) -> Result<()>
where
    F: FnOnce() -> Result<bool>,
{
    println!("🔧 Setting up RipSync...");

    ensure_mkcert(runner, consent).await?;
    generate_certificates(project, net, runner).await?;
    write_env_files(project, net)?;

    println!("✅ Environment setup complete!");
    Ok(())
}

/// Default consent hook: ask on the terminal whether mkcert may be installed
pub fn confirm_mkcert_install() -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt("mkcert is not installed. Install it now?")
        .default(true)
        .interact()?)
}

/// Make sure mkcert answers a version probe, installing it with the host
/// package manager when the consent hook allows it
async fn ensure_mkcert<F>(runner: &dyn ProcessRunner, consent: F) -> Result<()>
where
    F: FnOnce() -> Result<bool>,
{
    if probe_mkcert(runner).await {
        return Ok(());
    }

    if !consent()? {
        return Err(Error::setup("mkcert is required"));
    }

    let manager = PackageManager::detect()
        .ok_or_else(|| Error::setup("no supported package manager found, install mkcert manually"))?;
    println!("📦 Installing mkcert using {manager}...");
    let outcome = runner.run(&manager.install_mkcert()).await;
    if !outcome.success() || !probe_mkcert(runner).await {
        return Err(Error::setup(
            "failed to install mkcert, please install it manually",
        ));
    }
    Ok(())
}

async fn probe_mkcert(runner: &dyn ProcessRunner) -> bool {
    runner
        .run(&Cmd::new("mkcert").args(["--version"]).quiet())
        .await
        .success()
}

async fn generate_certificates(
    project: &Path,
    net: &NetworkConfig,
    runner: &dyn ProcessRunner,
) -> Result<()> {
    for component in [BACKEND_DIR, FRONTEND_DIR] {
        let ssl_dir = project.join(component).join("ssl");
        fs::create_dir_all(&ssl_dir)?;
        println!("🔐 Generating certs in {}", ssl_dir.display());

        let cmd = Cmd::new("mkcert")
            .args(["-cert-file", CERT_FILE, "-key-file", KEY_FILE])
            .args(["localhost", "127.0.0.1"])
            .args([net.ip.to_string()])
            .cwd(&ssl_dir);
        if !runner.run(&cmd).await.success() {
            return Err(Error::setup(format!(
                "mkcert failed in {}",
                ssl_dir.display()
            )));
        }

        for file in [CERT_FILE, KEY_FILE] {
            if !ssl_dir.join(file).is_file() {
                return Err(Error::setup(format!(
                    "{file} was not created in {}",
                    ssl_dir.display()
                )));
            }
        }
    }
    Ok(())
}

/// Write the `KEY=VALUE` env files both components read at startup
fn write_env_files(project: &Path, net: &NetworkConfig) -> Result<()> {
    let backend_env = format!("SERVER_IP={}\nSERVER_PORT={}\n", net.ip, net.backend_port);
    fs::write(project.join(BACKEND_DIR).join(".env"), backend_env)?;

    let frontend_env = format!(
        "NEXT_PUBLIC_WS_SERVER_IP={}\nNEXT_PUBLIC_WS_SERVER_PORT={}\nFRONTEND_PORT={}\n",
        net.ip, net.backend_port, net.frontend_port
    );
    fs::write(project.join(FRONTEND_DIR).join(".env.local"), frontend_env)?;

    info!("wrote env files for {}", project.display());
    Ok(())
}

/// Host package managers mkcert can be installed with, in detection order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PackageManager {
    Brew,
    Choco,
    Apt,
    Pacman,
}

impl PackageManager {
    const DETECTION_ORDER: [Self; 4] = [Self::Brew, Self::Choco, Self::Apt, Self::Pacman];

    /// First manager whose binary is on PATH
    fn detect() -> Option<Self> {
        Self::DETECTION_ORDER
            .into_iter()
            .find(|manager| which::which(manager.binary()).is_ok())
    }

    fn binary(self) -> &'static str {
        match self {
            Self::Brew => "brew",
            Self::Choco => "choco",
            Self::Apt => "apt",
            Self::Pacman => "pacman",
        }
    }

    /// The manager's mkcert install command; apt needs a shell for the
    /// update-then-install compound
    fn install_mkcert(self) -> Cmd {
        match self {
            Self::Brew => Cmd::new("brew").args(["install", "mkcert"]),
            Self::Choco => Cmd::new("choco").args(["install", "mkcert", "-y"]),
            Self::Apt => {
                Cmd::new("sh").args(["-c", "sudo apt update && sudo apt install mkcert -y"])
            }
            Self::Pacman => Cmd::new("sudo").args(["pacman", "-Syu", "mkcert", "--noconfirm"]),
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.binary())
    }
}
