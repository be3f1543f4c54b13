//! Batch Orchestrator Module
//!
//! This module implements the orchestration layer that runs every work
//! item's pipeline (request transaction → sign → broadcast) with a hard
//! cap on how many pipelines are in flight at once, isolates each
//! pipeline's failure from its siblings, and returns one outcome per
//! work item in submission order.
//!
//! # Pipeline Flow
//! 1. Acquire one slot from the admission semaphore
//! 2. Request a constructed-but-unsigned transaction from the mint API
//! 3. Sign it with the work item's wallet (local, synchronous)
//! 4. Broadcast the signed transaction to the ledger
//! 5. Release the slot (success or failure) and report the outcome

use crate::{
    api::MintTransactionSource,
    broadcast::TransactionBroadcaster,
    error::MintError,
    types::{AssetDescriptor, MintOutcome, MintReceipt, WorkItem},
};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Batch orchestrator
///
/// Coordinates the per-wallet mint pipelines. Both network clients are
/// shared across all pipelines; the admission semaphore is the only
/// mutable shared state.
pub struct BatchOrchestrator {
    /// Source of unsigned mint transactions (shared across pipelines)
    api: Arc<dyn MintTransactionSource>,
    /// Ledger submission client (shared across pipelines)
    broadcaster: Arc<dyn TransactionBroadcaster>,
    /// Maximum number of pipelines in flight at once
    concurrency_limit: usize,
}

impl BatchOrchestrator {
    /// Creates a new batch orchestrator
    ///
    /// A `concurrency_limit` of zero would never admit a pipeline, so it
    /// is clamped to one.
    ///
    /// # Arguments
    /// * `api` - Shared mint API client
    /// * `broadcaster` - Shared ledger submission client
    /// * `concurrency_limit` - Cap on simultaneously in-flight pipelines
    pub fn new(
        api: Arc<dyn MintTransactionSource>,
        broadcaster: Arc<dyn TransactionBroadcaster>,
        concurrency_limit: usize,
    ) -> Self {
        Self {
            api,
            broadcaster,
            concurrency_limit: concurrency_limit.max(1),
        }
    }

    /// Run every work item's pipeline and collect outcomes
    ///
    /// Outcomes come back in the same order the work items were
    /// submitted, regardless of the order pipelines finish in, and the
    /// outcome count always equals the work item count. A pipeline
    /// failure becomes a failing outcome for that item only; it never
    /// cancels a sibling or aborts the batch.
    ///
    /// # Arguments
    /// * `items` - Ordered work items; an empty list yields an empty result
    pub async fn run(&self, items: Vec<WorkItem>) -> Vec<MintOutcome> {
        if items.is_empty() {
            return Vec::new();
        }

        info!(
            "Dispatching {} mint pipelines (concurrency limit {})",
            items.len(),
            self.concurrency_limit
        );

        // Captured up front so a task that never settles (panic or abort)
        // can still be reported against the right wallet.
        let manifest: Vec<(Pubkey, AssetDescriptor)> = items
            .iter()
            .map(|item| (item.wallet.pubkey(), item.descriptor.clone()))
            .collect();

        let gate = Arc::new(Semaphore::new(self.concurrency_limit));
        let mut handles = Vec::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            let gate = gate.clone();
            let api = self.api.clone();
            let broadcaster = self.broadcaster.clone();
            let payer = item.wallet.pubkey();

            handles.push(tokio::spawn(async move {
                // The semaphore lives as long as every task, so acquire
                // only fails if the batch is being torn down.
                let _permit = match gate.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return (
                            index,
                            MintOutcome::Failure {
                                payer,
                                descriptor: item.descriptor,
                                error: MintError::Cancelled,
                            },
                        );
                    }
                };

                let outcome = match run_pipeline(api.as_ref(), broadcaster.as_ref(), &item).await {
                    Ok(receipt) => MintOutcome::Success(receipt),
                    Err(error) => {
                        warn!(payer = %payer, asset = %item.descriptor.name, %error, "Mint pipeline failed");
                        MintOutcome::Failure {
                            payer,
                            descriptor: item.descriptor,
                            error,
                        }
                    }
                };
                (index, outcome)
                // Permit drops here, releasing the slot for the next pipeline
            }));
        }

        // Settle every pipeline before returning. Each task carries its
        // originating index, so completion order never affects output order.
        let mut outcomes: Vec<Option<MintOutcome>> = Vec::new();
        outcomes.resize_with(handles.len(), || None);

        for (index, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok((slot, outcome)) => outcomes[slot] = Some(outcome),
                Err(join_error) => {
                    warn!(index, %join_error, "Mint pipeline task did not settle");
                }
            }
        }

        let outcomes: Vec<MintOutcome> = outcomes
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    let (payer, descriptor) = manifest[index].clone();
                    MintOutcome::Failure {
                        payer,
                        descriptor,
                        error: MintError::Cancelled,
                    }
                })
            })
            .collect();

        let failures = outcomes.iter().filter(|o| !o.is_success()).count();
        info!(
            "Batch settled: {} succeeded, {} failed",
            outcomes.len() - failures,
            failures
        );
        outcomes
    }
}

/// One work item's pipeline: request → sign → broadcast
///
/// Errors at any step are returned to the caller, which converts them
/// into a failing outcome for this item alone.
async fn run_pipeline(
    api: &dyn MintTransactionSource,
    broadcaster: &dyn TransactionBroadcaster,
    item: &WorkItem,
) -> Result<MintReceipt, MintError> {
    let payer = item.wallet.pubkey();

    debug!(payer = %payer, asset = %item.descriptor.name, "Requesting unsigned transaction");
    let mut tx = api.request_transaction(&payer, &item.descriptor).await?;

    item.wallet.sign_transaction(&mut tx)?;

    debug!(payer = %payer, "Broadcasting signed transaction");
    let signature = broadcaster.submit(&tx).await?;

    // The mint API does not return the new mint address, so it stays
    // unresolved in the receipt.
    Ok(MintReceipt {
        payer,
        mint: None,
        signature,
    })
}
