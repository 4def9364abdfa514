//! Client configuration: gateway URL and key pair.

use crate::auth::Credentials;
use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://gateway.marvel.com/v1/public";

pub const ENV_PUBLIC_KEY: &str = "MARVEL_PUBLIC_KEY";
pub const ENV_PRIVATE_KEY: &str = "MARVEL_PRIVATE_KEY";
pub const ENV_BASE_URL: &str = "MARVEL_BASE_URL";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub credentials: Credentials,
}

impl ClientConfig {
    /// Config pointing at the public gateway.
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: Credentials::new(public_key, private_key),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read the key pair (and optionally the base URL) from the environment.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ApiError::Config(format!("{key} must be set")))
        };
        let config = Self::new(required(ENV_PUBLIC_KEY)?, required(ENV_PRIVATE_KEY)?);
        Ok(match lookup(ENV_BASE_URL) {
            Some(base_url) if !base_url.is_empty() => config.with_base_url(base_url),
            _ => config,
        })
    }
}
