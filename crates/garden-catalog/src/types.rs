use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Region whose catalog endpoint serves the complete Model Garden listing.
///
/// The global endpoint returns a curated subset and regional endpoints often
/// refuse the listing call outright, so every discovery request goes here.
pub const MASTER_REGION: &str = "us-central1";

const API_HOST: &str = "aiplatform.googleapis.com";
const API_VERSION: &str = "v1beta1";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Opaque publisher-model identifier, e.g. `publishers/google/models/gemini-pro`.
pub struct CatalogItem(String);

impl CatalogItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CatalogItem {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Catalog API endpoint selector. Stateless; resolved to a base URL per client.
pub enum Endpoint {
    /// The master-catalog region used for discovery.
    Master,
    /// A specific target region under evaluation.
    Regional(String),
    /// The region-less host; serves the publisher directory.
    Global,
}

impl Endpoint {
    pub fn for_region(region: &str) -> Self {
        if region == MASTER_REGION {
            Self::Master
        } else {
            Self::Regional(region.to_string())
        }
    }

    pub fn base_url(&self) -> String {
        match self {
            Self::Master => format!("https://{MASTER_REGION}-{API_HOST}/{API_VERSION}"),
            Self::Regional(region) => format!("https://{region}-{API_HOST}/{API_VERSION}"),
            Self::Global => format!("https://{API_HOST}/{API_VERSION}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Why a probed model is excluded from the regional result.
pub enum UnavailableReason {
    /// The region answered 404 for the model resource.
    NotFound,
    /// Any other failure: permission, server error, timeout, bad payload.
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Terminal outcome of a single regional availability probe.
pub enum ProbeOutcome {
    Available,
    Unavailable(UnavailableReason),
}

impl ProbeOutcome {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

#[derive(Debug, Error)]
/// Enumerates supported `CatalogError` values.
pub enum CatalogError {
    #[error("missing access token")]
    MissingAccessToken,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog endpoint returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
#[error("model catalog discovery failed: {0}")]
/// Fatal wrapper for failures of the master-catalog listing call.
pub struct DiscoveryError(#[from] pub CatalogError);

#[async_trait]
/// Trait contract for regional availability probing.
///
/// One implementation per transport: the HTTP catalog client in production,
/// deterministic oracles in tests. A probe never fails the run; every failure
/// folds into `ProbeOutcome::Unavailable`.
pub trait ModelProbe: Send + Sync {
    async fn probe(&self, item: &CatalogItem) -> ProbeOutcome;
}
