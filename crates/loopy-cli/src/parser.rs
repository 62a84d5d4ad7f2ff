//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::{Args, Parser};

use crate::commands::Commands;

/// Command-line interface for the loopy device telemetry SDK.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "loopy")]
#[command(about = "Collect device signals and talk to the loopy API")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub device: DeviceArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shaping how device signals are collected.
#[derive(Args, Debug, Clone, Default)]
pub struct DeviceArgs {
    /// Never start location services
    #[arg(long = "no-location", global = true)]
    pub no_location: bool,

    /// Simulate a denied location permission prompt
    #[arg(long = "deny-location", global = true)]
    pub deny_location: bool,

    /// Latitude reported as the device location
    #[arg(long, env = "LOOPY_LATITUDE", global = true, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Longitude reported as the device location
    #[arg(long, env = "LOOPY_LONGITUDE", global = true, allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Mobile carrier name to report
    #[arg(long, env = "LOOPY_CARRIER", global = true)]
    pub carrier: Option<String>,

    /// Report the advertising identifier as limited
    #[arg(long = "limit-ad-tracking", env = "LOOPY_LIMIT_AD_TRACKING", global = true)]
    pub limit_ad_tracking: bool,

    /// Directory holding persisted identifiers
    #[arg(long = "data-dir", env = "LOOPY_DATA_DIR", global = true)]
    pub data_dir: Option<String>,
}
