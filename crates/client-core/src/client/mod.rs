//! Client orchestration layer.
//!
//! [`CommunicationClient`] owns the tracked resource graph and is the entry
//! point applications drive: start operations, capability queries, event
//! ingestion, and handler registration. Construction and lifecycle live in
//! [`manager`], the start operations in [`operations`].

pub mod config;
pub mod manager;
pub mod operations;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::ClientConfig;
pub use manager::CommunicationClient;
pub use types::{ClientStats, CommunicationCapability};
