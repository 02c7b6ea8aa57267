//! gas - TensorBay command-line tool

use std::io;
use std::process;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use tensorbay::cli;
use tensorbay::client::GasHttp;
use tensorbay::config::{CliArgs, Command, Profile};

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let profile = Profile::from_args(&args)?;
    let gas = GasHttp::new(profile.gas_config())?;

    match args.command {
        Command::Ls { tbrn, all_files } => {
            let mut stdout = io::stdout().lock();
            cli::ls(&gas, tbrn.as_deref(), all_files, &mut stdout)?;
        }
    }
    Ok(())
}

fn main() {
    let args = CliArgs::parse();
    setup_logging(args.verbose, args.quiet);

    // User-facing failures are one line on stderr, no stack trace.
    if let Err(e) = run(args) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
