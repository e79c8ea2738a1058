use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tracing::info;

use crate::{CatalogItem, ModelProbe, ProbeOutcome, UnavailableReason, MASTER_REGION};

/// Default in-flight probe cap. Probes are cheap I/O-bound GETs, so a high
/// cap cuts wall-clock time on 100+ model catalogs without tripping API
/// rate limits. Any value >= 1 yields the same result set.
pub const DEFAULT_PROBE_CONCURRENCY: usize = 50;

/// Completed-probe count between progress log lines.
pub const PROGRESS_LOG_INTERVAL: usize = 20;

#[derive(Debug, Clone)]
/// Tuning knobs for one `resolve` call.
pub struct ResolveOptions {
    pub concurrency: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_PROBE_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Aggregate handed to the rendering layer: the resolved subset plus the
/// counts needed for reporting.
pub struct ResolveReport {
    pub region: String,
    pub publisher: String,
    pub discovered: usize,
    pub available: Vec<CatalogItem>,
}

/// Filters `items` down to the subset confirmed available in `region`.
///
/// If `region` is the master region the discovery set is already scoped to
/// it and is returned unchanged with zero probes issued. Otherwise every
/// item is probed concurrently under the configured cap and included iff
/// its probe confirms availability; not-found, permission errors, timeouts,
/// and malformed responses all count as unavailable. Returns only after
/// every submitted probe has a terminal outcome.
pub async fn resolve(
    probe: Arc<dyn ModelProbe>,
    items: Vec<CatalogItem>,
    region: &str,
    options: &ResolveOptions,
) -> Vec<CatalogItem> {
    if region == MASTER_REGION {
        info!("region is {MASTER_REGION}; returning full discovery catalog");
        return items;
    }

    let total = items.len();
    info!("filtering: verifying availability in {region} for {total} models");

    let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
    let (sender, mut receiver) = mpsc::unbounded_channel::<(usize, ProbeOutcome)>();

    for (index, item) in items.iter().cloned().enumerate() {
        let probe = probe.clone();
        let semaphore = semaphore.clone();
        let sender = sender.clone();
        tokio::spawn(async move {
            let outcome = match semaphore.acquire_owned().await {
                Ok(_permit) => probe.probe(&item).await,
                // The semaphore is never closed while tasks hold it; fail
                // closed if that invariant ever breaks.
                Err(_) => ProbeOutcome::Unavailable(UnavailableReason::Error(
                    "probe scheduler shut down".to_string(),
                )),
            };
            let _ = sender.send((index, outcome));
        });
    }
    drop(sender);

    // Collecting loop doubles as the completion barrier: the channel only
    // closes once every task has sent its outcome and dropped its sender.
    let mut outcomes: Vec<Option<ProbeOutcome>> = vec![None; total];
    let mut completed = 0usize;
    while let Some((index, outcome)) = receiver.recv().await {
        completed += 1;
        if completed % PROGRESS_LOG_INTERVAL == 0 {
            info!("checked {completed}/{total} models");
        }
        outcomes[index] = Some(outcome);
    }

    items
        .into_iter()
        .zip(outcomes)
        .filter_map(|(item, outcome)| match outcome {
            Some(outcome) if outcome.is_available() => Some(item),
            _ => None,
        })
        .collect()
}
