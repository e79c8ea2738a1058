//! Core library surface for the garden crates.
mod client;
mod discovery;
mod resolver;
mod retry;
mod types;

pub use client::{CatalogClient, CatalogConfig};
pub use discovery::discover;
pub use resolver::{
    resolve, ResolveOptions, ResolveReport, DEFAULT_PROBE_CONCURRENCY, PROGRESS_LOG_INTERVAL,
};
pub use types::{
    CatalogError, CatalogItem, DiscoveryError, Endpoint, ModelProbe, ProbeOutcome,
    UnavailableReason, MASTER_REGION,
};
