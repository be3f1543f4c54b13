use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::error::MintError;
use crate::wallet::Wallet;

/// Metadata describing one asset to be created on the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    /// Royalty in basis points (0..=10000)
    pub seller_fee_basis_points: u16,
}

impl AssetDescriptor {
    /// Check the descriptor fields before dispatch
    ///
    /// Name, symbol, and URI must be non-empty and the royalty must stay
    /// within the 0..=10000 basis-point range.
    pub fn validate(&self) -> Result<(), MintError> {
        if self.name.trim().is_empty() {
            return Err(MintError::Validation("asset name must not be empty".to_string()));
        }
        if self.symbol.trim().is_empty() {
            return Err(MintError::Validation("asset symbol must not be empty".to_string()));
        }
        if self.uri.trim().is_empty() {
            return Err(MintError::Validation("asset uri must not be empty".to_string()));
        }
        if self.seller_fee_basis_points > 10_000 {
            return Err(MintError::Validation(format!(
                "seller_fee_basis_points must be <= 10000, got {}",
                self.seller_fee_basis_points
            )));
        }
        Ok(())
    }
}

/// One wallet paired with one descriptor
///
/// The batch is an ordered list of work items. Each wallet appears in at
/// most one item per run, so its signing key is never used by two
/// pipelines concurrently.
#[derive(Debug)]
pub struct WorkItem {
    pub wallet: Wallet,
    pub descriptor: AssetDescriptor,
}

/// Result of a successful mint pipeline
#[derive(Debug, Clone)]
pub struct MintReceipt {
    /// The wallet that paid for and signed the transaction
    pub payer: Pubkey,
    /// Address of the newly created mint, when known
    ///
    /// The mint API response does not carry this today, so it stays `None`.
    pub mint: Option<Pubkey>,
    /// Transaction signature returned by the ledger
    pub signature: String,
}

/// Per-work-item result
///
/// Exactly one outcome is produced for every submitted work item, whether
/// its pipeline succeeded or failed.
#[derive(Debug, Clone)]
pub enum MintOutcome {
    Success(MintReceipt),
    Failure {
        payer: Pubkey,
        descriptor: AssetDescriptor,
        error: MintError,
    },
}

impl MintOutcome {
    /// The wallet address this outcome belongs to
    pub fn payer(&self) -> Pubkey {
        match self {
            MintOutcome::Success(receipt) => receipt.payer,
            MintOutcome::Failure { payer, .. } => *payer,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MintOutcome::Success(_))
    }
}
