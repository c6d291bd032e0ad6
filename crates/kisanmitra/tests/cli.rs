// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs the built binary against a throwaway SQLite store.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let db = dir.join("cli.db");
    let path = dir.join("kisanmitra.toml");
    let body = format!(
        "[storage]\nbackend = \"sqlite\"\ndatabase_path = \"{}\"\n{extra}",
        db.display()
    );
    std::fs::write(&path, body).expect("write config");
    path
}

fn kisanmitra(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kisanmitra"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run kisanmitra")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn seed_then_stats_as_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), "");

    let seeded = kisanmitra(&config, &["seed", "--phone", "9800012345"]);
    assert!(seeded.status.success(), "{seeded:?}");
    let text = stdout(&seeded);
    let user = text
        .lines()
        .next()
        .and_then(|l| l.strip_prefix("Seeded sample data for "))
        .and_then(|l| l.strip_suffix(':'))
        .expect("user id in seed output")
        .to_string();

    let stats = kisanmitra(&config, &["stats", "--user", &user, "--json"]);
    assert!(stats.status.success(), "{stats:?}");
    let json: serde_json::Value = serde_json::from_str(&stdout(&stats)).expect("json");
    assert_eq!(json["successfulSales"], 1);
    assert_eq!(json["activeListings"], 1);
    assert_eq!(json["level"], "Active Farmer");

    let activity = kisanmitra(&config, &["activity", "--user", &user, "--limit", "2"]);
    assert!(activity.status.success());
    assert_eq!(stdout(&activity).lines().count(), 2);
}

#[test]
fn empty_store_views() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), "");

    assert_eq!(stdout(&kisanmitra(&config, &["cart"])), "Cart is empty.\n");
    assert_eq!(stdout(&kisanmitra(&config, &["orders"])), "No orders yet.\n");
}

#[test]
fn doctor_passes_on_fresh_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), "");
    // Create the database first so the integrity check runs.
    assert!(kisanmitra(&config, &["cart"]).status.success());

    let output = kisanmitra(&config, &["doctor", "--plain"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("All checks passed."), "{text}");
    assert!(text.contains("[OK]"));
}

#[test]
fn config_command_prints_effective_values() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), "\n[cart]\ndelivery_fee = 60\n");

    let output = kisanmitra(&config, &["config"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("delivery_fee = 60"));
    assert!(text.contains("cli.db"));
}

#[test]
fn invalid_config_exits_with_code_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), "\n[activity]\nmax_entriess = 5\n");

    let output = kisanmitra(&config, &["cart"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
