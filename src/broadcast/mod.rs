//! Broadcast Module
//!
//! Submits signed transactions to the ledger over a shared RPC
//! connection. The network is the authority on validity, so preflight
//! simulation is skipped; confirmation tracking is out of scope.

mod client;

pub use client::{RpcBroadcaster, TransactionBroadcaster};
