//! Minimal pad client with a built-in keymap
//!
//! Connects to the `wackeys` socket and turns every button into a fixed key,
//! one row of eight per layer. No config file, no window lookup and no ring
//! handling: useful for checking that the driver and `xdotool` work before
//! writing a mapping file for `wactions`.
//!
//! Usage: `cargo run --bin fixed_keymap -- [-s /tmp/WacKeys.sock]`

use clap::Parser;
use colored::*;
use std::env;
use std::net::Shutdown;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use wactions::core::{decode, Event};
use wactions::desktop::{find_missing_tools, Synthesizer, XdotoolSynthesizer};
use wactions::ipc::{connect, FrameReader, DEFAULT_SOCKET_PATH};

/// Key for each (layer, button), layers top to bottom
const KEYMAP: [[&str; 8]; 4] = [
    ["a", "b", "c", "d", "e", "f", "g", "h"],
    ["i", "j", "k", "l", "m", "n", "o", "p"],
    ["q", "r", "s", "t", "u", "v", "w", "x"],
    ["y", "z", "1", "2", "3", "4", "5", "6"],
];

#[derive(Parser)]
#[command(name = "fixed_keymap")]
#[command(about = "Map pad buttons to a fixed set of keys", long_about = None)]
struct Cli {
    /// Path to the wackeys driver socket
    #[arg(short, long, default_value = DEFAULT_SOCKET_PATH)]
    socket: PathBuf,
}

/// Key bound to `button` on `layer`, both zero-based.
fn fixed_key(layer: u32, button: u32) -> Option<&'static str> {
    let row = KEYMAP.get(usize::try_from(layer).ok()?)?;
    row.get(usize::try_from(button).ok()?).copied()
}

/// Presses or releases the fixed key for a button event; ignores the rest.
fn handle_event(event: Event, synthesizer: &mut dyn Synthesizer) {
    let result = match event {
        Event::ButtonPress {
            button_index,
            layer_index,
        } => fixed_key(layer_index, button_index).map(|key| synthesizer.press(key)),
        Event::ButtonRelease {
            button_index,
            layer_index,
        } => fixed_key(layer_index, button_index).map(|key| synthesizer.release(key)),
        Event::RingRotate { .. } | Event::RingRotateEnd => None,
    };

    if let Some(Err(e)) = result {
        log::warn!("{}", e);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let path_var = env::var_os("PATH").unwrap_or_default();
    if !find_missing_tools(&path_var, &["xdotool"]).is_empty() {
        anyhow::bail!("Make sure xdotool is installed.");
    }

    let stream = connect(&cli.socket)?;
    let shutdown_handle = stream
        .try_clone()
        .context("Failed to clone socket handle")?;
    ctrlc::set_handler(move || {
        let _ = shutdown_handle.shutdown(Shutdown::Both);
    })
    .context("Failed to install signal handler")?;

    println!("{} Connected to {}", "✓".green(), cli.socket.display());

    let mut synthesizer = XdotoolSynthesizer;
    let mut frames = FrameReader::new(stream);
    while let Some(frame) = frames.next_frame()? {
        match decode(&frame) {
            Ok(event) => handle_event(event, &mut synthesizer),
            Err(e) => log::debug!("Dropping frame: {}", e),
        }
    }

    Ok(())
}
