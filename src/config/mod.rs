//! Configuration module

pub mod cli;
pub mod profile;

pub use cli::{CliArgs, Command};
pub use profile::Profile;
