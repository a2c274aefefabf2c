use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "signcopy",
    version,
    about = "Save, paste and share sign images",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Directory holding saved images.
    #[arg(long, value_name = "PATH", env = "SIGNCOPY_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// World manifest describing signs and their textures.
    #[arg(long, value_name = "PATH", global = true)]
    pub world: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save the image on a sign under a name.
    Save {
        user: u64,
        target: String,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Paste a saved image onto a sign, by name or list number.
    Paste {
        user: u64,
        target: String,
        #[arg(required = true, num_args = 1..)]
        image: Vec<String>,
    },
    /// Submit the image on a sign for admin review.
    Submit {
        user: u64,
        target: String,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Delete a saved image, by name or list number.
    Remove {
        user: u64,
        #[arg(required = true, num_args = 1..)]
        image: Vec<String>,
    },
    /// List saved images.
    List { user: u64 },
    /// Record that a user was active.
    Seen { user: u64 },
    /// Show the number of submissions awaiting review.
    Pending {
        /// Only report if this user is an admin who should be told.
        #[arg(long, value_name = "USER")]
        admin: Option<u64>,
    },
    /// Purge collections of inactive users.
    Sweep,
}

impl Command {
    /// Whether running the command can change the image store. Paste only
    /// records its cooldown, but that is persisted too.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Save { .. }
                | Self::Paste { .. }
                | Self::Submit { .. }
                | Self::Remove { .. }
                | Self::Seen { .. }
                | Self::Sweep
        )
    }
}
