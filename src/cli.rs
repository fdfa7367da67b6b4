//! CLI argument parsing via clap.

use std::path::PathBuf;

use clap::Parser;

use crate::build_info;

/// Interactive file-manager shell.
#[derive(Debug, Parser)]
#[command(
    name = "fmsh",
    version = build_info::VERSION,
    long_version = build_info::LONG_VERSION,
    after_help = build_info::HELP_BUILD_METADATA
)]
pub struct Args {
    /// Name used in the welcome and farewell lines (default: $USER).
    #[arg(long = "username", value_name = "NAME")]
    pub username: Option<String>,

    /// Path to config file (default: ./fmsh.toml or ~/.config/fmsh/fmsh.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}
