//! Input Resolver Module
//!
//! Produces the ordered list of asset descriptors for a batch run and
//! pairs them with wallets:
//! - **Single mode**: one `--name/--symbol/--uri` triple, broadcast to
//!   every wallet
//! - **Tabular mode**: a CSV of rows assigned to wallets round-robin
//!   (wallet `i` gets row `i % rows`)
//!
//! Exactly one mode must be triggered per invocation; each wallet mints
//! exactly once.

mod resolver;

pub use resolver::{assign_work_items, resolve_metadata};
