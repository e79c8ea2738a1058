use std::sync::Arc;

use httpmock::prelude::*;
use serde_json::json;

use garden_catalog::{
    discover, resolve, CatalogClient, CatalogConfig, CatalogItem, ModelProbe, ResolveOptions,
    MASTER_REGION,
};

fn client(server: &MockServer) -> CatalogClient {
    CatalogClient::new(CatalogConfig {
        api_base: format!("{}/v1beta1", server.base_url()),
        access_token: "test-token".to_string(),
        project: Some("test-project".to_string()),
        request_timeout_ms: 5_000,
        probe_retries: 0,
    })
    .expect("catalog client should be created")
}

#[tokio::test]
async fn discovery_then_regional_filtering_yields_confirmed_subset() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1beta1/publishers/google/models");
        then.status(200).json_body(json!({
            "publisherModels": [
                {"name": "publishers/google/models/a"},
                {"name": "publishers/google/models/b"},
                {"name": "publishers/google/models/c"}
            ]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/v1beta1/publishers/google/models/a");
        then.status(200).json_body(json!({"name": "publishers/google/models/a"}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/v1beta1/publishers/google/models/b");
        then.status(404).body("not found");
    });
    server.mock(|when, then| {
        when.method(GET).path("/v1beta1/publishers/google/models/c");
        then.status(503).body("backend unavailable");
    });

    let catalog = client(&server);
    let items = discover(&catalog, "google")
        .await
        .expect("discovery should succeed");
    assert_eq!(items.len(), 3);

    let probe: Arc<dyn ModelProbe> = Arc::new(client(&server));
    let available = resolve(probe, items, "europe-west4", &ResolveOptions::default()).await;

    assert_eq!(available, vec![CatalogItem::new("publishers/google/models/a")]);
}

#[tokio::test]
async fn master_region_run_skips_every_probe_call() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1beta1/publishers/google/models");
        then.status(200).json_body(json!({
            "publisherModels": (0..50)
                .map(|index| json!({"name": format!("publishers/google/models/model-{index}")}))
                .collect::<Vec<_>>()
        }));
    });
    let probes = server.mock(|when, then| {
        when.method(GET)
            .path_includes("/v1beta1/publishers/google/models/");
        then.status(200).json_body(json!({}));
    });

    let catalog = client(&server);
    let items = discover(&catalog, "google")
        .await
        .expect("discovery should succeed");
    assert_eq!(items.len(), 50);

    let probe: Arc<dyn ModelProbe> = Arc::new(client(&server));
    let available = resolve(
        probe,
        items.clone(),
        MASTER_REGION,
        &ResolveOptions::default(),
    )
    .await;

    assert_eq!(available, items);
    probes.assert_calls(0);
}

#[tokio::test]
async fn failed_discovery_halts_the_run_before_any_probe() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1beta1/publishers/google/models");
        then.status(500).body("internal error");
    });
    let probes = server.mock(|when, then| {
        when.method(GET)
            .path_includes("/v1beta1/publishers/google/models/");
        then.status(200).json_body(json!({}));
    });

    let catalog = client(&server);
    let error = discover(&catalog, "google")
        .await
        .expect_err("discovery must surface the transport failure");

    assert!(error.to_string().contains("500"));
    probes.assert_calls(0);
}
