//! In-memory proof-of-work ledger with longest-valid-chain reconciliation
//! across manually registered peers.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod network;
pub mod node;
pub mod transaction;
