//! CLI subcommands

pub mod config;
pub mod doctor;
pub mod sort;
pub mod watch;

use anyhow::{Context, Result};
use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;

use tabtidy_adapters::browser::{BridgeClient, BridgeGroupSink, BridgeTabSource, StubBrowser};
use tabtidy_adapters::snapshot::SqliteSnapshotStore;
use tabtidy_domain::{
    Clock, GroupSink, SnapshotStore, SystemClock, TabSource, usecases::Organizer,
};

use crate::config::AppConfig;

pub(crate) type CliOrganizer =
    Organizer<dyn TabSource, dyn GroupSink, dyn SnapshotStore, dyn Clock>;

/// Wired collaborators for one command invocation
pub(crate) struct Runtime {
    pub organizer: CliOrganizer,
    /// Separate handle for the watch loop's status polling
    pub tabs: Arc<dyn TabSource>,
}

pub(crate) async fn build_runtime(config: &AppConfig) -> Result<Runtime> {
    let (tabs, groups): (Arc<dyn TabSource>, Arc<dyn GroupSink>) = if config.general.offline {
        tracing::info!("Offline mode, using in-memory browser");
        let stub = Arc::new(StubBrowser::new());
        (
            Arc::clone(&stub) as Arc<dyn TabSource>,
            stub as Arc<dyn GroupSink>,
        )
    } else {
        let client = BridgeClient::new(
            config.bridge.base_url.clone(),
            load_bridge_token(&config.bridge.auth_token_env),
            Duration::from_secs(config.bridge.timeout_secs),
        );
        (
            Arc::new(BridgeTabSource::new(client.clone())) as Arc<dyn TabSource>,
            Arc::new(BridgeGroupSink::new(client)) as Arc<dyn GroupSink>,
        )
    };

    let snapshots: Arc<dyn SnapshotStore> = Arc::new(
        SqliteSnapshotStore::new(&config.general.state_db_path)
            .await
            .context("Failed to initialize snapshot store")?,
    );

    let organizer = Organizer::new(
        Arc::clone(&tabs),
        groups,
        snapshots,
        Arc::new(SystemClock) as Arc<dyn Clock>,
    );

    Ok(Runtime { organizer, tabs })
}

/// Read the bridge bearer token from the configured env var, if any
fn load_bridge_token(env_var: &str) -> Option<SecretString> {
    if env_var.trim().is_empty() {
        return None;
    }
    match std::env::var(env_var) {
        Ok(token) if !token.trim().is_empty() => Some(SecretString::new(token.into())),
        _ => None,
    }
}
