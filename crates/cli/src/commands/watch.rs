//! Watch command - react to tabs finishing loading
//!
//! Polls the bridge for tab states and fires the tab-load trigger whenever a
//! tab is newly fully loaded: sort, then group when the sort actually moved
//! something. The first poll only seeds the baseline.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::interval;

use tabtidy_domain::{PassOutcome, TabHandle, TabId, TabState};

use crate::args::WatchArgs;
use crate::commands::{Runtime, build_runtime};
use crate::config::AppConfig;

pub async fn execute(args: WatchArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let runtime = build_runtime(&config).await?;

    if args.once {
        return run_pass(&runtime).await.context("Pass failed");
    }

    let poll_secs = args
        .poll_interval_secs
        .unwrap_or(config.watch.poll_interval_secs)
        .max(1);
    let mut ticker = interval(Duration::from_secs(poll_secs));
    let mut seen: Option<HashMap<TabId, TabState>> = None;

    tracing::info!(poll_secs, "Watching for tab loads");

    // Set up graceful shutdown
    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        tracing::info!("Shutdown signal received");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let tabs = match runtime.tabs.list_tabs().await {
                    Ok(tabs) => tabs,
                    Err(error) => {
                        tracing::warn!(%error, "Tab poll failed");
                        continue;
                    }
                };

                let loaded = completed_since(&mut seen, &tabs);
                if loaded > 0 {
                    tracing::debug!(loaded, "Tabs finished loading");
                    if let Err(error) = run_pass(&runtime).await {
                        tracing::error!(%error, "Pass failed");
                    }
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutting down gracefully");
                break;
            }
        }
    }

    Ok(())
}

async fn run_pass(runtime: &Runtime) -> Result<(), tabtidy_domain::usecases::PassError> {
    let (outcome, report) = runtime.organizer.on_tab_loaded().await?;
    match outcome {
        PassOutcome::Sorted => {
            let report = report.unwrap_or_default();
            tracing::info!(
                created = report.created,
                failed = report.failed,
                "Sorted and grouped"
            );
        }
        PassOutcome::Unchanged => {
            tracing::debug!("Arrangement unchanged");
        }
    }
    Ok(())
}

/// Count tabs newly observed in the Complete state since the previous poll
///
/// A `None` baseline means this is the first poll: it seeds state without
/// firing, so tabs already loaded at startup do not trigger a pass. A tab
/// that appears mid-watch already Complete counts as a completion.
fn completed_since(
    seen: &mut Option<HashMap<TabId, TabState>>,
    tabs: &[TabHandle],
) -> usize {
    let current: HashMap<TabId, TabState> = tabs.iter().map(|t| (t.id, t.state)).collect();

    let fired = match seen {
        None => 0,
        Some(previous) => current
            .iter()
            .filter(|&(id, state)| {
                *state == TabState::Complete && previous.get(id) != Some(&TabState::Complete)
            })
            .count(),
    };

    *seen = Some(current);
    fired
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: i64, state: TabState) -> TabHandle {
        TabHandle {
            id: TabId(id),
            url: Some("https://a.com/".to_string()),
            state,
        }
    }

    #[test]
    fn first_poll_only_seeds() {
        let mut seen = None;
        let fired = completed_since(&mut seen, &[tab(1, TabState::Complete)]);
        assert_eq!(fired, 0);
        assert!(seen.is_some());
    }

    #[test]
    fn loading_to_complete_fires_once() {
        let mut seen = None;
        completed_since(&mut seen, &[tab(1, TabState::Loading)]);

        assert_eq!(completed_since(&mut seen, &[tab(1, TabState::Complete)]), 1);
        assert_eq!(completed_since(&mut seen, &[tab(1, TabState::Complete)]), 0);
    }

    #[test]
    fn new_tab_already_complete_fires() {
        let mut seen = None;
        completed_since(&mut seen, &[tab(1, TabState::Complete)]);

        let fired = completed_since(
            &mut seen,
            &[tab(1, TabState::Complete), tab(2, TabState::Complete)],
        );
        assert_eq!(fired, 1);
    }

    #[test]
    fn still_loading_does_not_fire() {
        let mut seen = None;
        completed_since(&mut seen, &[tab(1, TabState::Loading)]);

        assert_eq!(completed_since(&mut seen, &[tab(1, TabState::Loading)]), 0);
    }
}
