//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "kefbridge",
    version,
    about = "Accessory bridge and CLI for KEF wireless speakers"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Speaker host name or IP (direct control commands)
    #[arg(short = 'H', long, env = "KEFBRIDGE_HOST", global = true)]
    pub host: Option<String>,

    /// Path to the bridge configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show power, volume, source, and playback state
    Status,

    /// Power the speaker on or put it into standby
    Power {
        #[arg(value_enum)]
        state: Switch,
    },

    /// Get the volume, or set it when LEVEL is given
    Volume {
        /// Target volume (0-100)
        level: Option<i64>,
    },

    /// Mute or unmute the speaker
    Mute {
        #[arg(value_enum)]
        state: Switch,
    },

    /// Switch the input source (wifi, bluetooth, tv, optical, coaxial, analog)
    Source { source: String },

    /// Toggle play/pause
    Play,

    /// Run the accessory bridge until interrupted
    Serve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}
