//! CLI entry point for wactions
//!
//! Loads the mapping file, checks for the X11 tools, connects to the
//! `wackeys` socket and runs the event loop until the driver goes away or
//! the user interrupts.

use anyhow::Context;
use clap::Parser;
use colored::*;
use std::env;
use std::net::Shutdown;
use std::path::{Path, PathBuf};
use std::process;

use wactions::actions::ActionDispatcher;
use wactions::config::{load_config, Config, ConfigError};
use wactions::daemon::{DaemonContext, EventLoop};
use wactions::desktop::{
    find_missing_tools, CommandRunner, DryRun, XdotoolSynthesizer, XpropWindowContext,
    REQUIRED_TOOLS,
};
use wactions::ipc::{connect, DEFAULT_SOCKET_PATH};

#[derive(Parser)]
#[command(name = "wactions")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the wackeys driver socket
    #[arg(short, long, default_value = DEFAULT_SOCKET_PATH)]
    socket: PathBuf,

    /// Path to the mapping config
    #[arg(short, long, default_value = "~/.config/wactions/config")]
    config: PathBuf,

    /// Validate the config, print its mappings and exit
    #[arg(long)]
    check: bool,

    /// Log actions instead of performing them
    #[arg(long)]
    dry_run: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(default_level(cli.verbose, cli.dry_run));

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        process::exit(1);
    }
}

/// Log filter used when `RUST_LOG` is unset
///
/// `--dry-run` reports its actions at info level, so it never goes below that.
fn default_level(verbose: u8, dry_run: bool) -> &'static str {
    match verbose {
        0 if dry_run => "info",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = expand_path(&cli.config)?;

    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(ConfigError::NotFound(_)) => {
            anyhow::bail!("Could not find configuration file: {}", config_path.display())
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Invalid config {}", config_path.display()))
        }
    };

    for warning in config.unrecognised_keys() {
        log::warn!("{}", warning);
    }

    if cli.check {
        print_mappings(&config_path, &config);
        return Ok(());
    }

    let path_var = env::var_os("PATH").unwrap_or_default();
    let missing = find_missing_tools(&path_var, REQUIRED_TOOLS);
    if !missing.is_empty() {
        anyhow::bail!(
            "Make sure both of xdotool and xprop are installed (missing: {}).",
            missing.join(", ")
        );
    }

    let context = DaemonContext::new(config, cli.socket);
    let stream = connect(&context.socket_path)?;
    log::info!("Connected to {}", context.socket_path.display());

    // Ctrl-C / SIGTERM shut the socket down; the loop then sees end-of-stream
    let shutdown_handle = stream
        .try_clone()
        .context("Failed to clone socket handle")?;
    ctrlc::set_handler(move || {
        log::info!("Interrupted, closing connection");
        let _ = shutdown_handle.shutdown(Shutdown::Both);
    })
    .context("Failed to install signal handler")?;

    let dispatcher = if cli.dry_run {
        ActionDispatcher::new(Box::new(DryRun), Box::new(DryRun))
    } else {
        ActionDispatcher::new(Box::new(XdotoolSynthesizer), Box::new(CommandRunner))
    };

    let mut event_loop = EventLoop::new(&context, stream, Box::new(XpropWindowContext), dispatcher);
    event_loop.run()?;

    Ok(())
}

/// Expand `~` in a CLI path
fn expand_path(path: &Path) -> anyhow::Result<PathBuf> {
    let expanded = shellexpand::tilde(
        path.to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    );

    Ok(PathBuf::from(expanded.as_ref()))
}

/// List every section and mapping in the config (`--check`)
fn print_mappings(path: &Path, config: &Config) {
    println!("{}", format!("Mappings from: {}\n", path.display()).bold());

    let mut total = 0;
    for section in config.sections() {
        println!("{}", format!("[{}]", section.name()).cyan().bold());

        for (key, value) in section.entries() {
            let action = wactions::ActionSpec::parse(value);
            println!("  {} → {}", key.green(), action);
            total += 1;
        }
        println!();
    }

    let unknown = config.unrecognised_keys().len();
    if unknown > 0 {
        println!(
            "{} {} unrecognised key{}",
            "⚠".yellow(),
            unknown,
            if unknown == 1 { "" } else { "s" }
        );
    }

    println!("{} Total: {} mappings", "✓".green(), total);
}
