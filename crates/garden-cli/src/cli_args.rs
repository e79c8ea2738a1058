use clap::{Parser, Subcommand};

use garden_catalog::{DEFAULT_PROBE_CONCURRENCY, MASTER_REGION};

fn parse_positive_usize(value: &str) -> Result<usize, String> {
    let parsed = value
        .parse::<usize>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "garden-enumerator",
    about = "Enumerate Vertex AI publisher models actually available in a region",
    version
)]
/// Public struct `Cli` shared by the enumerator binary and its tests.
pub struct Cli {
    #[arg(
        long,
        env = "GOOGLE_CLOUD_PROJECT",
        help = "Google Cloud project id charged for catalog calls"
    )]
    pub project: Option<String>,

    #[arg(
        long,
        env = "REGION",
        default_value = MASTER_REGION,
        help = "Target region to verify availability for (e.g. europe-west4)"
    )]
    pub region: String,

    #[arg(long, default_value = "google", help = "Model publisher namespace")]
    pub publisher: String,

    #[arg(
        long = "access-token",
        env = "GOOGLE_ACCESS_TOKEN",
        hide_env_values = true,
        help = "Pre-minted OAuth access token (e.g. from `gcloud auth print-access-token`)"
    )]
    pub access_token: Option<String>,

    #[arg(
        long,
        default_value_t = DEFAULT_PROBE_CONCURRENCY,
        value_parser = parse_positive_usize,
        help = "Maximum in-flight availability probes"
    )]
    pub concurrency: usize,

    #[arg(
        long = "request-timeout-ms",
        default_value_t = 30_000,
        value_parser = parse_positive_u64,
        help = "Per-call HTTP timeout in milliseconds"
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long = "probe-retries",
        default_value_t = 0,
        help = "Extra attempts for transient probe failures; 0 keeps the fail-closed default"
    )]
    pub probe_retries: usize,

    #[arg(
        long = "api-base",
        env = "GARDEN_API_BASE",
        hide = true,
        help = "Override the catalog base URL (testing only)"
    )]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
/// Enumerates supported `Command` values. No subcommand runs the enumeration.
pub enum Command {
    /// Probe the named models in the target region and print per-model status.
    Inspect {
        #[arg(required = true, value_name = "MODEL")]
        models: Vec<String>,
    },
    /// Verify connectivity and credentials against the publisher directory.
    Doctor,
}
