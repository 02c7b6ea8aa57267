//! Utility modules

pub mod error;

pub use error::{ClientError, LoaderError, Result, TbrnError, TensorbayError};
