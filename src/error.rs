//! Error Types
//!
//! Error taxonomy for the minting pipeline. Configuration and validation
//! errors are fatal and abort the run before any pipeline is dispatched;
//! remote-service, signing, and broadcast errors are scoped to a single
//! work item and become a failing outcome for that item only.

use thiserror::Error;

/// Minting pipeline error
#[derive(Error, Debug, Clone)]
pub enum MintError {
    /// Bad or missing setup (wallets, endpoints). Fatal, the batch never starts.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed descriptor or input row. Fatal before dispatch.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The transaction-construction request failed. Scoped to one work item.
    #[error("Mint API request failed: {0}")]
    RemoteService(String),

    /// Local signing failed. Scoped to one work item.
    #[error("Transaction signing failed: {0}")]
    Signing(String),

    /// The ledger rejected the transaction or the network failed during
    /// submission. Scoped to one work item.
    #[error("Transaction broadcast failed: {0}")]
    Broadcast(String),

    /// The pipeline task was aborted before it settled.
    #[error("Mint task cancelled before completion")]
    Cancelled,
}
