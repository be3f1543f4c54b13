//! Batch Minting Module
//!
//! Fans out per-wallet mint pipelines under a global concurrency cap and
//! collects one outcome per work item in submission order.

mod orchestrator;


pub use orchestrator::BatchOrchestrator;
