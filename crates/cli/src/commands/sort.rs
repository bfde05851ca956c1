//! Sort command - the manual trigger
//!
//! Clears the arrangement snapshot first, so the pass always reorders even
//! when the strip already matches the last computed order. Grouping is not
//! part of the manual trigger.

use anyhow::{Context, Result};
use std::path::PathBuf;

use tabtidy_domain::PassOutcome;

use crate::args::SortArgs;
use crate::commands::build_runtime;
use crate::config::AppConfig;

pub async fn execute(args: SortArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let runtime = build_runtime(&config).await?;

    let outcome = if args.keep_history {
        runtime.organizer.sort_once().await
    } else {
        runtime.organizer.refresh().await
    }
    .context("Sort pass failed")?;

    match outcome {
        PassOutcome::Sorted => println!("sorted"),
        PassOutcome::Unchanged => println!("no-op"),
    }

    Ok(())
}
