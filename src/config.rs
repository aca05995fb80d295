// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client configuration from environment variables and global flags.

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub auth_url: Option<String>,
    pub auth_key: Option<String>,
    pub session_file: PathBuf,
    pub timeout_secs: u64,
}

impl Config {
    /// Build from the process environment, then apply `--api-url` / `--auth-url`.
    ///
    /// - `EXPTRACK_API_URL`: expenses API base, default `http://localhost:8000`
    /// - `EXPTRACK_AUTH_URL`: authentication service base, no default
    /// - `EXPTRACK_AUTH_KEY`: anon key sent as `apikey`
    /// - `EXPTRACK_SESSION_FILE`: default `<data dir>/session.json`
    /// - `EXPTRACK_TIMEOUT_SECS`: default 30
    pub fn load(m: &clap::ArgMatches) -> Result<Self> {
        let mut cfg = Self::from_lookup(|k| std::env::var(k).ok())?;
        if let Some(url) = m.get_one::<String>("api-url") {
            cfg.api_url = normalize_url(url);
        }
        if let Some(url) = m.get_one::<String>("auth-url") {
            cfg.auth_url = Some(normalize_url(url));
        }
        Ok(cfg)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_url = normalize_url(&get("EXPTRACK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()));
        let auth_url = get("EXPTRACK_AUTH_URL").map(|u| normalize_url(&u));
        let auth_key = get("EXPTRACK_AUTH_KEY");
        let session_file = match get("EXPTRACK_SESSION_FILE") {
            Some(p) => PathBuf::from(p),
            None => crate::storage::default_session_path()?,
        };
        let timeout_secs = match get("EXPTRACK_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .with_context(|| format!("Invalid EXPTRACK_TIMEOUT_SECS '{}'", v))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            auth_url,
            auth_key,
            session_file,
            timeout_secs,
        })
    }
}

fn normalize_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
