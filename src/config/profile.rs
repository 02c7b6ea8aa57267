//! Gateway profile resolved from CLI arguments and environment

use crate::client::GasConfig;
use crate::utils::ClientError;

use super::cli::CliArgs;

/// Authentication and endpoint settings for one invocation
#[derive(Debug, Clone)]
pub struct Profile {
    pub access_key: String,
    pub url: Option<String>,
}

impl Profile {
    /// Resolve from parsed arguments; clap already merged the environment
    /// fallbacks (`TENSORBAY_ACCESS_KEY`, `TENSORBAY_URL`).
    pub fn from_args(args: &CliArgs) -> Result<Self, ClientError> {
        let access_key = args
            .access_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or(ClientError::MissingAccessKey)?;
        Ok(Self {
            access_key,
            url: args.url.clone(),
        })
    }

    /// Build the gateway client settings
    pub fn gas_config(&self) -> GasConfig {
        let config = GasConfig::new(self.access_key.as_str());
        match &self.url {
            Some(url) => config.with_url(url.as_str()),
            None => config,
        }
    }
}
