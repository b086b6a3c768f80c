//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hwprofile",
    version,
    about = "Normalize lshw hardware captures and extract flat hardware profiles",
    long_about = "hwprofile canonicalizes the value types of lshw JSON captures and flattens \
                  them into indexable hardware profiles: system identity, BIOS, CPU and memory \
                  totals, storage devices, network interfaces and categorized PCI devices."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/hwprofile/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Canonicalize the value types of a capture
    Normalize {
        /// Capture file in `{"hardware": {...}}` form
        file: PathBuf,
    },

    /// Extract the flat hardware profile of a capture
    Extract {
        /// Capture file in `{"hardware": {...}}` form
        file: PathBuf,

        /// Normalize the capture before extraction
        #[arg(short, long)]
        normalize: bool,
    },

    /// Extract profiles from many captures
    Batch {
        /// Capture files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write profiles as JSON lines to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_batch() {
        let cli = Cli::try_parse_from(["hwprofile", "-v", "batch", "a.json", "b.json", "-o", "out.jsonl"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Batch { files, output } => {
                assert_eq!(files.len(), 2);
                assert_eq!(output, Some(PathBuf::from("out.jsonl")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_batch_requires_files() {
        assert!(Cli::try_parse_from(["hwprofile", "batch"]).is_err());
    }
}
