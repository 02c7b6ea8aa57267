//! Command-line argument parsing for the `gas` binary

use clap::{Parser, Subcommand};

/// TensorBay command-line tool
#[derive(Parser, Debug, Clone)]
#[command(name = "gas")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Access key for the TensorBay gateway
    #[arg(
        short = 'k',
        long = "access-key",
        env = "TENSORBAY_ACCESS_KEY",
        global = true
    )]
    pub access_key: Option<String>,

    /// Gateway URL (defaults to the public endpoint)
    #[arg(short = 'u', long = "url", env = "TENSORBAY_URL", global = true)]
    pub url: Option<String>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List data on the platform addressed by a TBRN
    ///
    /// Without a TBRN, lists every dataset. With one, lists the resources
    /// one level below it: segments in a dataset, files or frames in a
    /// segment, sensors in a frame.
    Ls {
        /// Resource name, e.g. "tb:dataset", "tb:dataset:segment"
        tbrn: Option<String>,

        /// List files down to the leaf instead of container resources
        #[arg(short = 'a', long = "all-files")]
        all_files: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ls_defaults() {
        let args = CliArgs::parse_from(["gas", "ls"]);
        match args.command {
            Command::Ls { tbrn, all_files } => {
                assert_eq!(tbrn, None);
                assert!(!all_files);
            }
        }
    }

    #[test]
    fn test_ls_with_tbrn_and_flags() {
        let args = CliArgs::parse_from(["gas", "-k", "KEY", "ls", "-a", "tb:VOC2012:train"]);
        assert_eq!(args.access_key.as_deref(), Some("KEY"));
        match args.command {
            Command::Ls { tbrn, all_files } => {
                assert_eq!(tbrn.as_deref(), Some("tb:VOC2012:train"));
                assert!(all_files);
            }
        }
    }
}
