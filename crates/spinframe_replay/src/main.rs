// SPDX-License-Identifier: MIT OR Apache-2.0
//! `spinframe` - headless viewer replay
//!
//! Loads a viewer configuration and an input script (both RON), replays the
//! script through the interaction core on a virtual clock, logs every
//! notification, and writes the final pin collection as JSON.
//!
//! ```text
//! spinframe [-v] <config.ron> <script.ron> [--pins-out <file.json>]
//! ```
//!
//! Set `RUST_LOG=spinframe_core=debug` to see individual frame ticks.

mod replay;
mod script;

use clap::Parser;
use script::{Result, Script};
use spinframe_core::{ViewerConfig, ViewerController};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Replay scripted input through a 360° viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Viewer configuration (RON)
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Input script (RON)
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Write the final pins here instead of stdout
    #[arg(short = 'o', long = "pins-out", value_name = "FILE")]
    pins_out: Option<PathBuf>,

    /// Increase logging verbosity (default: info, -v: debug, -vv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbosity: u8,
}

impl Args {
    fn default_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "spinframe=info,spinframe_core=info",
            1 => "spinframe=debug,spinframe_core=debug",
            _ => "spinframe=trace,spinframe_core=trace",
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = ViewerConfig::load(&args.config)?;
    let script = Script::load(&args.script)?;
    tracing::info!(
        "Loaded {} frames from {:?}, {} script steps ({} ms)",
        config.frame_count(),
        args.config,
        script.steps.len(),
        script.duration_ms()
    );

    let mut viewer = ViewerController::new(config)?;
    let _log = viewer.subscribe(|event| tracing::info!("{}: {:?}", event.name(), event));

    let summary = replay::run(&mut viewer, &script);
    tracing::info!(
        "Replayed {} steps in {:?}: frame {}, {} autoplay ticks, {} pins",
        summary.steps,
        summary.elapsed,
        summary.final_frame,
        summary.autoplay_ticks,
        summary.pin_count
    );

    let pins = viewer.pins().to_json()?;
    match args.pins_out {
        Some(path) => {
            std::fs::write(&path, pins)?;
            tracing::info!("Wrote pins to {:?}", path);
        }
        None => println!("{pins}"),
    }

    viewer.dispose();
    Ok(())
}

fn main() {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.default_filter()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting spinframe v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("spinframe").chain(args.iter().copied()))
    }

    #[test]
    fn test_args() {
        let args = parse(&["viewer.ron", "--pins-out", "pins.json", "drag.ron"]).unwrap();
        assert_eq!(args.config, PathBuf::from("viewer.ron"));
        assert_eq!(args.script, PathBuf::from("drag.ron"));
        assert_eq!(args.pins_out, Some(PathBuf::from("pins.json")));
        assert_eq!(args.default_filter(), "spinframe=info,spinframe_core=info");
    }

    #[test]
    fn test_verbosity() {
        let args = parse(&["-vv", "a.ron", "b.ron"]).unwrap();
        assert_eq!(args.verbosity, 2);
        assert!(args.default_filter().contains("trace"));
    }

    #[test]
    fn test_args_errors() {
        assert!(parse(&["viewer.ron"]).is_err());
        assert!(parse(&["a", "b", "--pins-out"]).is_err());
        assert!(parse(&["a", "b", "c"]).is_err());
    }
}
