//! Configuration Module
//!
//! Endpoint and fee configuration for the minter. Values come from an
//! optional TOML file with environment variables taking precedence, and
//! required fields are checked at startup, before any network activity.
//!
//! # Example TOML
//! ```toml
//! rpc_url = "https://private-rpc.example.com"
//! commitment = "finalized"
//! priority_fee_microlamports = 10000
//! compute_unit_limit = 400000
//! private_api_url = "https://mint-api.example.com"
//! ```
//!
//! # Environment variables
//! `PRIVATE_RPC_URL`, `COMMITMENT`, `PRIORITY_FEE_MICROLAMPORTS`,
//! `COMPUTE_UNIT_LIMIT`, `PRIVATE_API_URL`

use std::path::Path;
use std::str::FromStr;
use std::{env, fs};

use serde::Deserialize;
use solana_sdk::commitment_config::CommitmentConfig;

use crate::error::MintError;

/// Commitment level used when none is configured
pub const DEFAULT_COMMITMENT: &str = "finalized";

/// Resolved minter configuration
///
/// Every field has been validated; `rpc_url` and `private_api_url` are
/// guaranteed non-empty and `commitment` parses as a commitment level.
#[derive(Debug, Clone)]
pub struct Config {
    /// Private RPC endpoint used to broadcast signed transactions
    pub rpc_url: String,
    /// Commitment level for the RPC connection
    pub commitment: String,
    /// Optional priority fee hint forwarded to the mint API
    pub priority_fee_microlamports: Option<u64>,
    /// Optional compute unit limit hint forwarded to the mint API
    pub compute_unit_limit: Option<u32>,
    /// Base URL of the private transaction-construction service
    pub private_api_url: String,
}

/// Configuration as read from disk, before env overrides and validation
#[derive(Debug, Clone, Default, Deserialize)]
struct RawConfig {
    rpc_url: Option<String>,
    commitment: Option<String>,
    priority_fee_microlamports: Option<u64>,
    compute_unit_limit: Option<u32>,
    private_api_url: Option<String>,
}

impl Config {
    /// Load configuration from an optional TOML file plus the environment
    ///
    /// # Arguments
    /// * `path` - Optional TOML file; when `None`, only the environment
    ///   is consulted
    ///
    /// # Returns
    /// * `Ok(Config)` once all required fields are present and valid
    /// * `Err(MintError::Configuration)` otherwise
    pub fn load(path: Option<&Path>) -> Result<Self, MintError> {
        let mut raw = match path {
            Some(p) => {
                let content = fs::read_to_string(p).map_err(|e| {
                    MintError::Configuration(format!(
                        "cannot read config file {}: {}",
                        p.display(),
                        e
                    ))
                })?;
                toml::from_str(&content).map_err(|e| {
                    MintError::Configuration(format!(
                        "invalid config file {}: {}",
                        p.display(),
                        e
                    ))
                })?
            }
            None => RawConfig::default(),
        };

        apply_env_overrides(&mut raw)?;
        Self::finalize(raw)
    }

    /// Validate a raw configuration and fill in defaults
    fn finalize(raw: RawConfig) -> Result<Self, MintError> {
        let rpc_url = raw
            .rpc_url
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                MintError::Configuration(
                    "PRIVATE_RPC_URL is required (environment variable or config file)"
                        .to_string(),
                )
            })?;

        let private_api_url = raw
            .private_api_url
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                MintError::Configuration(
                    "PRIVATE_API_URL is required (environment variable or config file)"
                        .to_string(),
                )
            })?;

        let commitment = raw
            .commitment
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_COMMITMENT.to_string());
        // Reject unknown levels here so the failure happens before any
        // network client is built.
        CommitmentConfig::from_str(&commitment).map_err(|_| {
            MintError::Configuration(format!("unsupported commitment level: {commitment}"))
        })?;

        Ok(Config {
            rpc_url,
            commitment,
            priority_fee_microlamports: raw.priority_fee_microlamports,
            compute_unit_limit: raw.compute_unit_limit,
            private_api_url,
        })
    }

    /// The configured commitment as a Solana commitment config
    pub fn commitment_config(&self) -> CommitmentConfig {
        // Validated in finalize, so the fallback is unreachable in practice
        CommitmentConfig::from_str(&self.commitment).unwrap_or_default()
    }
}

/// Overlay environment variables onto the raw configuration
fn apply_env_overrides(raw: &mut RawConfig) -> Result<(), MintError> {
    if let Some(v) = non_empty_env("PRIVATE_RPC_URL") {
        raw.rpc_url = Some(v);
    }
    if let Some(v) = non_empty_env("COMMITMENT") {
        raw.commitment = Some(v);
    }
    if let Some(v) = non_empty_env("PRIORITY_FEE_MICROLAMPORTS") {
        raw.priority_fee_microlamports = Some(v.parse().map_err(|_| {
            MintError::Configuration(format!(
                "PRIORITY_FEE_MICROLAMPORTS must be an integer, got '{v}'"
            ))
        })?);
    }
    if let Some(v) = non_empty_env("COMPUTE_UNIT_LIMIT") {
        raw.compute_unit_limit = Some(v.parse().map_err(|_| {
            MintError::Configuration(format!("COMPUTE_UNIT_LIMIT must be an integer, got '{v}'"))
        })?);
    }
    if let Some(v) = non_empty_env("PRIVATE_API_URL") {
        raw.private_api_url = Some(v);
    }
    Ok(())
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rpc: Option<&str>, api: Option<&str>) -> RawConfig {
        RawConfig {
            rpc_url: rpc.map(str::to_string),
            commitment: None,
            priority_fee_microlamports: None,
            compute_unit_limit: None,
            private_api_url: api.map(str::to_string),
        }
    }

    #[test]
    fn missing_rpc_url_is_fatal() {
        let err = Config::finalize(raw(None, Some("http://api"))).unwrap_err();
        assert!(matches!(err, MintError::Configuration(_)));
        assert!(err.to_string().contains("PRIVATE_RPC_URL"));
    }

    #[test]
    fn missing_private_api_url_is_fatal() {
        let err = Config::finalize(raw(Some("http://rpc"), None)).unwrap_err();
        assert!(err.to_string().contains("PRIVATE_API_URL"));
    }

    #[test]
    fn empty_required_field_is_fatal() {
        let err = Config::finalize(raw(Some(""), Some("http://api"))).unwrap_err();
        assert!(matches!(err, MintError::Configuration(_)));
    }

    #[test]
    fn commitment_defaults_to_finalized() {
        let config = Config::finalize(raw(Some("http://rpc"), Some("http://api"))).unwrap();
        assert_eq!(config.commitment, DEFAULT_COMMITMENT);
    }

    #[test]
    fn unknown_commitment_is_rejected() {
        let mut r = raw(Some("http://rpc"), Some("http://api"));
        r.commitment = Some("instant".to_string());
        let err = Config::finalize(r).unwrap_err();
        assert!(err.to_string().contains("commitment"));
    }

    #[test]
    fn toml_round_trip_parses_hints() {
        let parsed: RawConfig = toml::from_str(
            r#"
            rpc_url = "http://rpc"
            private_api_url = "http://api"
            commitment = "confirmed"
            priority_fee_microlamports = 10000
            compute_unit_limit = 400000
            "#,
        )
        .unwrap();
        let config = Config::finalize(parsed).unwrap();

        assert_eq!(config.commitment, "confirmed");
        assert_eq!(config.priority_fee_microlamports, Some(10_000));
        assert_eq!(config.compute_unit_limit, Some(400_000));
    }
}
