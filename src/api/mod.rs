//! Mint API Module
//!
//! Client for the private transaction-construction service. The service
//! builds an unsigned mint transaction for a given payer and descriptor;
//! signing and broadcasting stay on this side.

mod client;

pub use client::{MintApiClient, MintTransactionSource};
