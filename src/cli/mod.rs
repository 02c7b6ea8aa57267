//! CLI command implementations

pub mod ls;
pub mod utility;

pub use ls::{ls, LsError};
