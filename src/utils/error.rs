//! Error types for the TensorBay SDK and CLI

use std::io;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum TensorbayError {
    #[error("TBRN error: {0}")]
    Tbrn(#[from] TbrnError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// TBRN parse errors
///
/// Each variant names the piece of the resource name that failed to parse,
/// so the CLI can report exactly what was wrong with the typed string.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TbrnError {
    #[error("TBRN must start with \"tb:\": \"{0}\"")]
    MissingScheme(String),

    #[error("TBRN has an empty {field} field: \"{tbrn}\"")]
    EmptyField { field: &'static str, tbrn: String },

    #[error("Invalid frame index \"{0}\": must be an unsigned integer")]
    InvalidFrameIndex(String),

    #[error("TBRN has too many fields: \"{0}\"")]
    TooManyFields(String),

    #[error("A frame index without a sensor cannot carry a remote path: \"{0}\"")]
    DanglingRemotePath(String),
}

/// Remote platform client errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("No such dataset: \"{0}\"")]
    NoSuchDataset(String),

    #[error("No such segment: \"{0}\"")]
    NoSuchSegment(String),

    #[error("Access key is not set")]
    MissingAccessKey,
}

/// Opendataset loader errors
///
/// Loaders are one-shot conversion utilities; any of these aborts the load.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("Malformed record in {path} line {line}: {reason}")]
    MalformedRecord {
        path: String,
        line: usize,
        reason: String,
    },

    #[error(
        "Ground truth files are misaligned: {mot_path} has {mot_lines} lines, \
         {det_path} has {det_lines} lines"
    )]
    MisalignedGroundTruth {
        mot_path: String,
        mot_lines: usize,
        det_path: String,
        det_lines: usize,
    },

    #[error("Enum code {code} out of range for attribute \"{attribute}\" (max {max})")]
    UnknownEnumCode {
        attribute: String,
        code: usize,
        max: usize,
    },

    #[error("Catalog is missing the {0} subcatalog")]
    MissingSubcatalog(&'static str),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("No frame id found in image name \"{0}\"")]
    MissingFrameId(String),
}

pub type Result<T> = std::result::Result<T, TensorbayError>;
