use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::sleep;

use crate::{
    retry::{is_retryable_http_error, next_backoff_ms, should_retry_status},
    CatalogError, CatalogItem, ModelProbe, ProbeOutcome, UnavailableReason,
};

const LIST_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
/// Public struct `CatalogConfig` shared by every catalog client binding.
pub struct CatalogConfig {
    /// Base URL including the API version segment, e.g.
    /// `https://us-central1-aiplatform.googleapis.com/v1beta1`.
    pub api_base: String,
    /// Pre-minted OAuth bearer token. The client never refreshes credentials.
    pub access_token: String,
    /// Project charged for the calls, sent as `x-goog-user-project`.
    pub project: Option<String>,
    pub request_timeout_ms: u64,
    /// Extra attempts for transient probe failures. Zero keeps the
    /// fail-closed default: one attempt, any failure counts as unavailable.
    pub probe_retries: usize,
}

#[derive(Debug, Clone)]
/// HTTP client bound to one catalog endpoint (master, regional, or global).
pub struct CatalogClient {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        if config.access_token.trim().is_empty() {
            return Err(CatalogError::MissingAccessToken);
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(
                config.request_timeout_ms.max(1),
            ))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn api_base(&self) -> &str {
        self.config.api_base.trim_end_matches('/')
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .get(url)
            .bearer_auth(&self.config.access_token);
        if let Some(project) = self.config.project.as_deref() {
            request = request.header("x-goog-user-project", project);
        }
        request
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, CatalogError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }

        Err(CatalogError::HttpStatus {
            status: status.as_u16(),
            body,
        })
    }

    /// Lists every model the publisher has in this endpoint's catalog.
    ///
    /// Pagination is followed transparently; the returned list is fully
    /// materialized because the resolver needs the total count up front.
    pub async fn list_publisher_models(
        &self,
        publisher: &str,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let url = format!("{}/publishers/{publisher}/models", self.api_base());
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![("pageSize", LIST_PAGE_SIZE.to_string())];
            if let Some(token) = page_token.as_ref() {
                query.push(("pageToken", token.clone()));
            }

            let raw = self.send(self.get(&url).query(&query)).await?;
            let page: ListPublisherModelsResponse = serde_json::from_str(&raw)?;
            items.extend(
                page.publisher_models
                    .unwrap_or_default()
                    .into_iter()
                    .map(|model| CatalogItem::new(model.name)),
            );

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(items)
    }

    /// Fetches one model resource by its full name. The model counts as
    /// present only if the success body decodes as a model resource; a 200
    /// from an intercepting proxy or a truncated payload does not.
    pub async fn get_publisher_model(&self, name: &str) -> Result<(), CatalogError> {
        let url = format!("{}/{name}", self.api_base());
        let raw = self.send(self.get(&url)).await?;
        serde_json::from_str::<PublisherModelEntry>(&raw)?;
        Ok(())
    }

    /// Lists publisher names from this endpoint. Used by the connection
    /// doctor to verify credentials before a full enumeration run.
    pub async fn list_publishers(&self) -> Result<Vec<String>, CatalogError> {
        let url = format!("{}/publishers", self.api_base());
        let raw = self.send(self.get(&url)).await?;
        let parsed: ListPublishersResponse = serde_json::from_str(&raw)?;
        Ok(parsed
            .publishers
            .unwrap_or_default()
            .into_iter()
            .map(|publisher| publisher.name)
            .collect())
    }
}

#[async_trait]
impl ModelProbe for CatalogClient {
    async fn probe(&self, item: &CatalogItem) -> ProbeOutcome {
        let max_retries = self.config.probe_retries;

        for attempt in 0..=max_retries {
            match self.get_publisher_model(item.name()).await {
                Ok(()) => return ProbeOutcome::Available,
                Err(CatalogError::HttpStatus { status: 404, .. }) => {
                    return ProbeOutcome::Unavailable(UnavailableReason::NotFound);
                }
                Err(error) => {
                    let transient = match &error {
                        CatalogError::HttpStatus { status, .. } => should_retry_status(*status),
                        CatalogError::Http(http_error) => is_retryable_http_error(http_error),
                        _ => false,
                    };
                    if attempt < max_retries && transient {
                        sleep(std::time::Duration::from_millis(next_backoff_ms(attempt))).await;
                        continue;
                    }
                    return ProbeOutcome::Unavailable(UnavailableReason::Error(error.to_string()));
                }
            }
        }

        ProbeOutcome::Unavailable(UnavailableReason::Error(
            "probe retry loop terminated unexpectedly".to_string(),
        ))
    }
}

#[derive(Debug, Deserialize)]
struct ListPublisherModelsResponse {
    #[serde(rename = "publisherModels")]
    publisher_models: Option<Vec<PublisherModelEntry>>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PublisherModelEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ListPublishersResponse {
    publishers: Option<Vec<PublisherEntry>>,
}

#[derive(Debug, Deserialize)]
struct PublisherEntry {
    name: String,
}
