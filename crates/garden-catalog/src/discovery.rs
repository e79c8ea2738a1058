use tracing::info;

use crate::{CatalogClient, CatalogItem, DiscoveryError};

/// Fetches the complete publisher catalog from the master endpoint.
///
/// Any failure here is fatal to the run: an incomplete catalog would produce
/// a silently incomplete result downstream, so there is no partial-discovery
/// mode. The caller must bind `client` to the master endpoint.
pub async fn discover(
    client: &CatalogClient,
    publisher: &str,
) -> Result<Vec<CatalogItem>, DiscoveryError> {
    info!("discovery: fetching full catalog from {}", client.api_base());
    let items = client.list_publisher_models(publisher).await?;
    info!("discovery: found {} models in master catalog", items.len());
    Ok(items)
}
