// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Merge order (later overrides earlier): compiled defaults,
//! `/etc/lumen/lumen.toml`, `~/.config/lumen/lumen.toml`, `./lumen.toml`,
//! then `LUMEN_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LumenConfig;

pub const SYSTEM_CONFIG: &str = "/etc/lumen/lumen.toml";
pub const LOCAL_CONFIG: &str = "lumen.toml";

/// Path of the per-user config file, if a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lumen/lumen.toml"))
}

/// Load configuration from the standard file hierarchy with env overrides.
pub fn load_config() -> Result<LumenConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<LumenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LumenConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one file, with env overrides.
pub fn load_config_from_path(path: &Path) -> Result<LumenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LumenConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The full hierarchy before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LumenConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// `LUMEN_APP_LOG_LEVEL` maps to `app.log_level`, `LUMEN_SCHEMA_EXTRA` to
/// `schema.extra`. Only the first underscore after the section is a separator.
fn env_provider() -> Env {
    Env::prefixed("LUMEN_").map(|key| {
        key.as_str()
            .to_ascii_lowercase()
            .replacen("app_", "app.", 1)
            .replacen("schema_", "schema.", 1)
            .into()
    })
}
