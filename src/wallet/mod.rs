//! Credential Store Module
//!
//! Loads signing wallets from keypair files on disk:
//! - A file path parses into exactly one wallet
//! - A directory path expands to all `*.json` keypair files directly
//!   inside it, sorted lexicographically by filename
//!
//! Accepted file encodings: a bare JSON array of secret-key bytes
//! (solana-keygen format) or an object with a `secret_key` byte array.

mod store;

pub use store::{Wallet, load_wallet_from_file, load_wallets};
