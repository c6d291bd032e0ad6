// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `kisanmitra doctor` command implementation.
//!
//! Runs diagnostic checks against the configured data store.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use colored::Colorize;
use kisanmitra_config::{KisanConfig, StorageBackend};
use kisanmitra_core::{HealthStatus, KeyValueStore, KisanError};
use kisanmitra_storage::{SqliteStore, open_store};

/// Status of a diagnostic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(
        name: &'static str,
        status: CheckStatus,
        message: impl Into<String>,
        start: Instant,
    ) -> Self {
        Self {
            name,
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }

    fn render(&self, use_color: bool) -> String {
        let ms = self.duration.as_millis();
        if !use_color {
            let tag = match self.status {
                CheckStatus::Pass => "[OK]  ",
                CheckStatus::Warn => "[WARN]",
                CheckStatus::Fail => "[FAIL]",
            };
            return format!("    {tag} {:<20} {} ({ms}ms)", self.name, self.message);
        }
        let (symbol, message) = match self.status {
            CheckStatus::Pass => ("✓".green(), self.message.normal()),
            CheckStatus::Warn => ("!".yellow(), self.message.yellow()),
            CheckStatus::Fail => ("✗".red(), self.message.red()),
        };
        format!("    {symbol} {:<20} {message} ({ms}ms)", self.name)
    }
}

/// Run every check and print a report. With `plain`, disables colored output.
pub fn run_doctor(config: &KisanConfig, plain: bool) -> Result<(), KisanError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = collect_checks(config);

    println!();
    println!("  kisanmitra doctor");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", result.render(use_color));
    }
    println!();

    let issues = results
        .iter()
        .filter(|r| r.status != CheckStatus::Pass)
        .count();
    if issues > 0 {
        let word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();
    Ok(())
}

fn collect_checks(config: &KisanConfig) -> Vec<CheckResult> {
    let mut results = vec![check_config(config), check_store(config)];
    if config.storage.backend == StorageBackend::Sqlite {
        results.push(check_db_integrity(&config.storage.database_path));
    }
    results
}

fn check_config(config: &KisanConfig) -> CheckResult {
    let start = Instant::now();
    match kisanmitra_config::validation::validate_config(config) {
        Ok(()) => CheckResult::new("Configuration", CheckStatus::Pass, "valid", start),
        Err(errors) => CheckResult::new(
            "Configuration",
            CheckStatus::Fail,
            format!("{} error(s)", errors.len()),
            start,
        ),
    }
}

/// Open the configured backend and round-trip its health check.
fn check_store(config: &KisanConfig) -> CheckResult {
    let start = Instant::now();
    let store = match open_store(&config.storage) {
        Ok(store) => store,
        Err(e) => {
            let message = format!("open failed: {e}");
            return CheckResult::new("Storage", CheckStatus::Fail, message, start);
        }
    };
    let (status, message) = match store.health_check() {
        Ok(HealthStatus::Healthy) => (CheckStatus::Pass, format!("{} healthy", store.name())),
        Ok(HealthStatus::Degraded(reason)) => (CheckStatus::Warn, format!("degraded: {reason}")),
        Ok(HealthStatus::Unhealthy(reason)) => (CheckStatus::Fail, format!("unhealthy: {reason}")),
        Err(e) => (CheckStatus::Fail, format!("check failed: {e}")),
    };
    CheckResult::new("Storage", status, message, start)
}

/// SQLite integrity check plus key count.
fn check_db_integrity(db_path: &str) -> CheckResult {
    let start = Instant::now();
    if !Path::new(db_path).exists() {
        return CheckResult::new(
            "DB integrity",
            CheckStatus::Warn,
            format!("not found: {db_path} (skipped)"),
            start,
        );
    }
    let checked = SqliteStore::open(db_path)
        .and_then(|store| Ok((store.integrity_check()?, store.count()?)));
    let (status, message) = match checked {
        Ok((verdict, keys)) if verdict == "ok" => (CheckStatus::Pass, format!("ok, {keys} key(s)")),
        Ok((verdict, _)) => (CheckStatus::Fail, verdict),
        Err(e) => (CheckStatus::Fail, format!("check failed: {e}")),
    };
    CheckResult::new("DB integrity", status, message, start)
}
