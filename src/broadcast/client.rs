use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::transaction::VersionedTransaction;
use tracing::debug;

use crate::error::MintError;

/// Submits signed transactions to the ledger
///
/// Trait seam so the orchestrator can be driven by a mock in tests.
#[async_trait]
pub trait TransactionBroadcaster: Send + Sync {
    /// Submit a signed transaction and return its signature string
    async fn submit(&self, tx: &VersionedTransaction) -> Result<String, MintError>;
}

/// Broadcaster backed by a shared Solana RPC connection
///
/// The underlying client is safe for concurrent use, so a single instance
/// is shared across every pipeline in a batch run.
pub struct RpcBroadcaster {
    rpc: RpcClient,
}

impl RpcBroadcaster {
    pub fn new(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(rpc_url.to_string(), commitment),
        }
    }
}

#[async_trait]
impl TransactionBroadcaster for RpcBroadcaster {
    async fn submit(&self, tx: &VersionedTransaction) -> Result<String, MintError> {
        // The network is the authority on validity; preflight simulation
        // only adds latency here.
        let config = RpcSendTransactionConfig {
            skip_preflight: true,
            ..Default::default()
        };

        let signature = self
            .rpc
            .send_transaction_with_config(tx, config)
            .await
            .map_err(|e| MintError::Broadcast(e.to_string()))?;

        debug!(signature = %signature, "Transaction accepted by RPC");
        Ok(signature.to_string())
    }
}
