mod report;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

use garden_catalog::{
    discover, resolve, CatalogClient, CatalogConfig, CatalogItem, Endpoint, ModelProbe,
    ResolveOptions, ResolveReport,
};
use garden_cli::{resolve_run_config, Cli, Command, RunConfig};

// Logs go to stderr so stdout stays clean for piping the policy listing.
fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run_cli(cli).await
}

async fn run_cli(cli: Cli) -> Result<()> {
    let config = resolve_run_config(&cli)?;
    match cli.command {
        None => run_enumerate(&config).await,
        Some(Command::Inspect { models }) => run_inspect(&config, &models).await,
        Some(Command::Doctor) => run_doctor(&config).await,
    }
}

fn catalog_config(config: &RunConfig, endpoint: &Endpoint) -> CatalogConfig {
    CatalogConfig {
        api_base: config
            .api_base
            .clone()
            .unwrap_or_else(|| endpoint.base_url()),
        access_token: config.access_token.clone(),
        project: Some(config.project.clone()),
        request_timeout_ms: config.request_timeout_ms,
        probe_retries: config.probe_retries,
    }
}

async fn run_enumerate(config: &RunConfig) -> Result<()> {
    let master = CatalogClient::new(catalog_config(config, &Endpoint::Master))?;
    let items = discover(&master, &config.publisher).await?;
    let discovered = items.len();

    let regional = CatalogClient::new(catalog_config(
        config,
        &Endpoint::for_region(&config.region),
    ))?;
    let probe: Arc<dyn ModelProbe> = Arc::new(regional);
    let options = ResolveOptions {
        concurrency: config.concurrency,
    };
    let available = resolve(probe, items, &config.region, &options).await;

    let report = ResolveReport {
        region: config.region.clone(),
        publisher: config.publisher.clone(),
        discovered,
        available,
    };

    if report.available.is_empty() {
        warn!("no models found available in {}", report.region);
        return Ok(());
    }

    info!(
        "retrieved {} of {} models available in {}",
        report.available.len(),
        report.discovered,
        report.region
    );
    print!("{}", report::render_policy_lines(&report));
    Ok(())
}

async fn run_inspect(config: &RunConfig, models: &[String]) -> Result<()> {
    let client = CatalogClient::new(catalog_config(
        config,
        &Endpoint::for_region(&config.region),
    ))?;

    for name in models {
        let item = CatalogItem::new(name.clone());
        info!("checking {item} in {}", config.region);
        let outcome = client.probe(&item).await;
        println!(
            "{}",
            report::render_probe_status(&item, &outcome, &config.region)
        );
    }
    Ok(())
}

async fn run_doctor(config: &RunConfig) -> Result<()> {
    let client = CatalogClient::new(catalog_config(config, &Endpoint::Global))?;
    info!("doctor: listing publishers from {}", client.api_base());

    let publishers = client
        .list_publishers()
        .await
        .context("publisher listing failed; check the access token and project")?;

    println!("found {} publishers", publishers.len());
    for name in publishers.iter().take(5) {
        println!(" - {name}");
    }
    Ok(())
}
