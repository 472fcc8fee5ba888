//! # Crunch Server
//!
//! Command line tool and HTTP server around [`crunch_core`].
//!
//! - `crunch compare` prints the comparison report of two laps as JSON
//! - `crunch render` writes the track map and corner analysis as SVG files
//! - `crunch serve` answers the same questions over HTTP (see [`web`])
//!
//! Telemetry files are JSON, one driver per file (see [`loader`]). Chart
//! appearance comes from [`config::RenderSettings`].
//!
//! ## Example
//!
//! ```rust
//! use clap::Parser;
//! use crunch_server::{Cli, Command};
//!
//! let args = Cli::parse_from(["crunch", "serve", "-p", "8080"]);
//! assert!(matches!(args.command, Command::Serve { port: 8080 }));
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use crunch_core::{DistanceWindow, InvalidInputError, OverlayMode};

pub mod config;
pub mod loader;
pub mod svg;
pub mod web;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Clone, Debug)]
#[command(name = "crunch", version, about = "Compare two drivers' laps")]
pub struct Cli {
    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// Render settings file, instead of render.json in the config directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Print the comparison report as JSON
    Compare(LapArgs),

    /// Write the track map (and with a window, the corner analysis) as SVG
    Render(RenderArgs),

    /// Serve the HTTP API
    Serve {
        /// Port for webserver
        #[arg(short, long, default_value_t = 6510)]
        port: u16,
    },
}

/// The two laps to compare, plus an optional distance window
#[derive(Args, Clone, Debug)]
pub struct LapArgs {
    /// Reference driver's telemetry file
    pub reference: PathBuf,

    /// Other driver's telemetry file
    pub other: PathBuf,

    /// Window start distance in meters
    #[arg(long, requires = "to", allow_negative_numbers = true)]
    pub from: Option<f64>,

    /// Window end distance in meters
    #[arg(long, requires = "from", allow_negative_numbers = true)]
    pub to: Option<f64>,
}

impl LapArgs {
    pub fn window(&self) -> Result<Option<DistanceWindow>, InvalidInputError> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => DistanceWindow::new(from, to).map(Some),
            _ => Ok(None),
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct RenderArgs {
    #[clap(flatten)]
    pub laps: LapArgs,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Track map overlay, overrides the settings file
    #[arg(long)]
    pub overlay: Option<OverlayMode>,

    /// Chart width, applied to every chart written
    #[arg(long)]
    pub width: Option<f64>,

    /// Chart height, applied to every chart written
    #[arg(long)]
    pub height: Option<f64>,
}
