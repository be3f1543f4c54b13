use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::VersionedTransaction;
use tracing::debug;

use crate::error::MintError;
use crate::types::AssetDescriptor;

/// Per-request timeout for the mint API, in seconds
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Source of constructed-but-unsigned mint transactions
///
/// The orchestrator depends on this trait rather than the HTTP client
/// directly, so tests can substitute an in-memory implementation.
#[async_trait]
pub trait MintTransactionSource: Send + Sync {
    /// Request an unsigned mint transaction for one payer and descriptor
    async fn request_transaction(
        &self,
        payer: &Pubkey,
        descriptor: &AssetDescriptor,
    ) -> Result<VersionedTransaction, MintError>;
}

/// Request body for `POST {base}/mint`
#[derive(Debug, Serialize)]
struct MintTransactionRequest<'a> {
    payer: String,
    name: &'a str,
    symbol: &'a str,
    uri: &'a str,
    seller_fee_basis_points: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority_fee_microlamports: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    compute_unit_limit: Option<u32>,
}

/// Success response body: `{ "transaction": "<base64>" }`
#[derive(Debug, Deserialize)]
struct MintTransactionResponse {
    transaction: Option<String>,
}

/// HTTP client for the private mint API
///
/// One instance is shared across every pipeline in a batch run; the
/// underlying `reqwest::Client` is safe for concurrent use.
pub struct MintApiClient {
    base_url: String,
    http: reqwest::Client,
    priority_fee_microlamports: Option<u64>,
    compute_unit_limit: Option<u32>,
}

impl MintApiClient {
    /// Build a client for the given base URL with the default timeout
    pub fn new(base_url: &str) -> Result<Self, MintError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| MintError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            priority_fee_microlamports: None,
            compute_unit_limit: None,
        })
    }

    /// Attach optional fee hints forwarded with every request
    pub fn with_fee_hints(
        mut self,
        priority_fee_microlamports: Option<u64>,
        compute_unit_limit: Option<u32>,
    ) -> Self {
        self.priority_fee_microlamports = priority_fee_microlamports;
        self.compute_unit_limit = compute_unit_limit;
        self
    }
}

#[async_trait]
impl MintTransactionSource for MintApiClient {
    async fn request_transaction(
        &self,
        payer: &Pubkey,
        descriptor: &AssetDescriptor,
    ) -> Result<VersionedTransaction, MintError> {
        let url = format!("{}/mint", self.base_url);
        let body = MintTransactionRequest {
            payer: payer.to_string(),
            name: &descriptor.name,
            symbol: &descriptor.symbol,
            uri: &descriptor.uri,
            seller_fee_basis_points: descriptor.seller_fee_basis_points,
            priority_fee_microlamports: self.priority_fee_microlamports,
            compute_unit_limit: self.compute_unit_limit,
        };

        debug!(payer = %payer, name = %descriptor.name, "Requesting mint transaction");
        let response = self.http.post(&url).json(&body).send().await.map_err(|e| {
            if e.is_timeout() {
                MintError::RemoteService(format!(
                    "mint API timed out after {REQUEST_TIMEOUT_SECS}s"
                ))
            } else {
                MintError::RemoteService(format!("mint API request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MintError::RemoteService(format!(
                "mint API returned status {status}"
            )));
        }

        let body: MintTransactionResponse = response.json().await.map_err(|e| {
            MintError::RemoteService(format!("mint API response is not valid JSON: {e}"))
        })?;

        decode_transaction(body)
    }
}

/// Decode the base64 transaction blob out of a mint API response body
fn decode_transaction(body: MintTransactionResponse) -> Result<VersionedTransaction, MintError> {
    let encoded = body.transaction.ok_or_else(|| {
        MintError::RemoteService("mint API response missing 'transaction' field".to_string())
    })?;

    let raw = BASE64.decode(encoded.as_bytes()).map_err(|e| {
        MintError::RemoteService(format!("'transaction' field is not valid base64: {e}"))
    })?;

    bincode::deserialize(&raw).map_err(|e| {
        MintError::RemoteService(format!("'transaction' blob is not a valid transaction: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::message::{Message, VersionedMessage};

    #[test]
    fn decode_accepts_documented_shape() {
        let tx = VersionedTransaction {
            signatures: Vec::new(),
            message: VersionedMessage::Legacy(Message::default()),
        };
        let encoded = BASE64.encode(bincode::serialize(&tx).unwrap());

        let decoded = decode_transaction(MintTransactionResponse {
            transaction: Some(encoded),
        })
        .unwrap();
        assert_eq!(decoded.signatures.len(), 0);
    }

    #[test]
    fn decode_rejects_missing_field() {
        let err = decode_transaction(MintTransactionResponse { transaction: None }).unwrap_err();
        assert!(matches!(err, MintError::RemoteService(_)));
        assert!(err.to_string().contains("transaction"));
    }

    #[test]
    fn decode_rejects_bad_base64() {
        let err = decode_transaction(MintTransactionResponse {
            transaction: Some("%%% not base64 %%%".to_string()),
        })
        .unwrap_err();
        assert!(matches!(err, MintError::RemoteService(_)));
    }

    #[test]
    fn decode_rejects_malformed_transaction_bytes() {
        let encoded = BASE64.encode([0xFFu8; 4]);
        let err = decode_transaction(MintTransactionResponse {
            transaction: Some(encoded),
        })
        .unwrap_err();
        assert!(matches!(err, MintError::RemoteService(_)));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = MintApiClient::new("http://localhost:9000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:9000");
    }
}
