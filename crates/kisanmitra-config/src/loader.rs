// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./kisanmitra.toml` > `~/.config/kisanmitra/kisanmitra.toml`
//! > `/etc/kisanmitra/kisanmitra.toml`, with environment variable overrides via
//! the `KISANMITRA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::KisanConfig;

pub(crate) const SYSTEM_CONFIG_PATH: &str = "/etc/kisanmitra/kisanmitra.toml";
pub(crate) const LOCAL_CONFIG_PATH: &str = "kisanmitra.toml";

/// Location of the per-user config file, if a config dir is known.
pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("kisanmitra").join("kisanmitra.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/kisanmitra/kisanmitra.toml`
/// 3. `~/.config/kisanmitra/kisanmitra.toml`
/// 4. `./kisanmitra.toml`
/// 5. `KISANMITRA_*` environment variables
pub fn load_config() -> Result<KisanConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<KisanConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KisanConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KisanConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KisanConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for the standard hierarchy, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(KisanConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment provider with an explicit section mapping.
///
/// Keys are matched case-insensitively and only the underscore after the
/// section name becomes a dot, so
/// `KISANMITRA_STORAGE_DATABASE_PATH` maps to `storage.database_path`.
fn env_provider() -> Env {
    Env::prefixed("KISANMITRA_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = ["storage", "activity", "stats", "cart", "logging"]
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|field| format!("{section}.{field}"))
            })
            .unwrap_or(key_str);
        mapped.into()
    })
}
