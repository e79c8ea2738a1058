use thiserror::Error;

use crate::Cli;

#[derive(Debug, Error)]
/// Enumerates supported `ConfigurationError` values. All are fatal before
/// any network call is attempted.
pub enum ConfigurationError {
    #[error("could not determine project id; set GOOGLE_CLOUD_PROJECT or pass --project")]
    MissingProject,
    #[error("could not determine access token; set GOOGLE_ACCESS_TOKEN or pass --access-token")]
    MissingAccessToken,
}

#[derive(Debug, Clone)]
/// Fully resolved run configuration handed to the orchestration layer.
pub struct RunConfig {
    pub project: String,
    pub region: String,
    pub publisher: String,
    pub access_token: String,
    pub concurrency: usize,
    pub request_timeout_ms: u64,
    pub probe_retries: usize,
    pub api_base: Option<String>,
}

/// Validates the parsed flags into a `RunConfig`.
///
/// clap already applied the CLI-over-environment precedence for project,
/// region, and token; this step only enforces that the required values
/// resolved to something.
pub fn resolve_run_config(cli: &Cli) -> Result<RunConfig, ConfigurationError> {
    let project = cli
        .project
        .as_deref()
        .map(str::trim)
        .filter(|project| !project.is_empty())
        .ok_or(ConfigurationError::MissingProject)?;
    let access_token = cli
        .access_token
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ConfigurationError::MissingAccessToken)?;

    Ok(RunConfig {
        project: project.to_string(),
        region: cli.region.clone(),
        publisher: cli.publisher.clone(),
        access_token: access_token.to_string(),
        concurrency: cli.concurrency,
        request_timeout_ms: cli.request_timeout_ms,
        probe_retries: cli.probe_retries,
        api_base: cli.api_base.clone(),
    })
}
