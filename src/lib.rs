//! Batch NFT minting for Solana: fans out build → sign → broadcast
//! pipelines across a pool of wallets under a global concurrency cap,
//! with per-item failure isolation and submission-order results.

pub mod types; // Core data structures (descriptors, work items, outcomes).
pub mod error; // Error taxonomy for the minting pipeline.
pub mod config; // Loads endpoint and fee configuration.
pub mod wallet; // Loads signing wallets from keypair files.
pub mod metadata; // Resolves asset descriptors and pairs them with wallets.
pub mod api; // Client for the private transaction-construction service.
pub mod broadcast; // Submits signed transactions to the ledger.
pub mod batch; // Bounded-concurrency batch orchestration.

// Re-export commonly used types for easier access.
pub use types::*;
pub use error::MintError;
pub use config::Config;
pub use batch::BatchOrchestrator;
