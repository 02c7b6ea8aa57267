//! Convert a local UAVDT directory tree into the in-memory dataset model
//! and report what was built.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use tensorbay::opendataset::uavdt;

/// Run the UAVDT opendataset loader against a local directory
#[derive(Parser, Debug)]
#[command(name = "convert-uavdt")]
#[command(version, about, long_about = None)]
struct Args {
    /// Root of the UAVDT layout (contains UAV-benchmark-M, M_attr, ...)
    root: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("valid progress template"),
    );
    spinner.set_message(format!("loading {}", args.root.display()));

    let dataset = uavdt::load(&args.root)
        .with_context(|| format!("loading UAVDT from {}", args.root.display()))?;
    spinner.finish_and_clear();

    let data_count: usize = dataset.segments().iter().map(|s| s.data().len()).sum();
    let box_count: usize = dataset
        .segments()
        .iter()
        .flat_map(|s| s.data())
        .map(|d| d.label.box2d.len())
        .sum();

    println!("Dataset: {}", dataset.name);
    println!("Segments: {}", dataset.segments().len());
    for segment in dataset.segments() {
        println!("  {}: {} data items", segment.name, segment.data().len());
    }
    println!("Data items: {}", data_count);
    println!("Box labels: {}", box_count);

    Ok(())
}
