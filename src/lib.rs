//! tensorbay - client SDK and CLI for the TensorBay dataset platform
//!
//! The crate has three layers:
//! - [`tbrn`]: the resource-name grammar addressing datasets, segments,
//!   frames, sensors and files;
//! - [`client`]: the remote platform trait seam plus the blocking HTTP
//!   gateway implementation;
//! - [`dataset`] and [`opendataset`]: the in-memory dataset model and the
//!   per-dataset loaders converting third-party layouts into it.
//!
//! The `gas` binary exposes the listing CLI on top of these.

pub mod cli;
pub mod client;
pub mod config;
pub mod dataset;
pub mod opendataset;
pub mod tbrn;
pub mod utils;
