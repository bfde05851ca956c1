//! Doctor command - validate configuration and show status

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use tabtidy_adapters::browser::{BridgeClient, BridgeTabSource};
use tabtidy_adapters::snapshot::SqliteSnapshotStore;
use tabtidy_domain::{SnapshotStore, TabSource};

use crate::args::DoctorArgs;
use crate::commands::load_bridge_token;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    snapshot_store: CheckResult,
    bridge: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        snapshot_store: CheckResult::error("Not checked"),
        bridge: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    // Check config
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            Some(c)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {}", e));
            None
        }
    };

    if let Some(ref config) = config {
        report.snapshot_store = check_snapshot_store(config).await;
        report.bridge = check_bridge(config).await;
    }

    let checks = [&report.config, &report.snapshot_store, &report.bridge];
    let has_error = checks.iter().any(|c| c.is_error());
    let all_ok = checks.iter().all(|c| c.is_ok());

    report.overall = if has_error {
        "error".to_string()
    } else if all_ok {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    // Output report
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

async fn check_snapshot_store(config: &AppConfig) -> CheckResult {
    match SqliteSnapshotStore::new(&config.general.state_db_path).await {
        Ok(store) => match store.load().await {
            Ok(Some(stored)) => CheckResult::ok(format!(
                "Snapshot present ({} tabs, updated {})",
                stored.domains.len(),
                stored.updated_at
            )),
            Ok(None) => CheckResult::ok("Snapshot store ready (no snapshot yet)"),
            Err(e) => CheckResult::error(format!("Failed to read snapshot: {}", e)),
        },
        Err(e) => CheckResult::error(format!("Failed to open snapshot store: {}", e)),
    }
}

async fn check_bridge(config: &AppConfig) -> CheckResult {
    if config.general.offline {
        return CheckResult::warn("Offline mode enabled, bridge not checked");
    }

    let client = BridgeClient::new(
        config.bridge.base_url.clone(),
        load_bridge_token(&config.bridge.auth_token_env),
        Duration::from_secs(config.bridge.timeout_secs),
    );

    match BridgeTabSource::new(client).list_tabs().await {
        Ok(tabs) => CheckResult::ok(format!(
            "Bridge reachable at {} ({} tabs)",
            config.bridge.base_url,
            tabs.len()
        )),
        Err(e) => CheckResult::error(format!(
            "Bridge unreachable at {}: {}",
            config.bridge.base_url, e
        )),
    }
}

fn print_report(report: &DoctorReport) {
    println!("tabtidy Doctor Report");
    println!("=====================");
    println!();

    print_check("Config", &report.config);
    print_check("Snapshot Store", &report.snapshot_store);
    print_check("Bridge", &report.bridge);

    println!();
    let symbol = match report.overall.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} Overall: {}", symbol, report.overall.to_uppercase());

    if report.overall == "ok" {
        println!();
        println!("Ready to run! Try: tabtidy watch --once");
    }
}

fn print_check(name: &str, result: &CheckResult) {
    let symbol = match result.status.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} {}: {}", symbol, name, result.message);
}
