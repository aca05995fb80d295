// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::session::Session;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.exptrack", "Exptrack", "exptrack"));

pub fn default_session_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().join("session.json"))
}

/// A missing file means signed out. A corrupt file is reported, not ignored.
pub fn load_session(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Read session at {}", path.display()))?;
    let session = serde_json::from_str(&raw)
        .with_context(|| format!("Corrupt session file at {}", path.display()))?;
    Ok(Some(session))
}

/// The file holds bearer tokens, so it is readable by the owner only.
pub fn save_session(path: &Path, session: &Session) -> Result<()> {
    let missing_dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty() && !d.exists());
    if let Some(dir) = missing_dir {
        fs::create_dir_all(dir).context("Failed to create data dir")?;
        restrict(dir, 0o700)?;
    }
    let raw = serde_json::to_string_pretty(session)?;
    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut file = opts
        .open(path)
        .with_context(|| format!("Write session at {}", path.display()))?;
    // A file created by an older version keeps its mode across open().
    restrict(path, 0o600)?;
    file.write_all(raw.as_bytes())
        .with_context(|| format!("Write session at {}", path.display()))?;
    Ok(())
}

#[cfg(unix)]
fn restrict(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("Set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

pub fn clear_session(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("Remove session at {}", path.display()))?;
    }
    Ok(())
}
