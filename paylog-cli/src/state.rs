use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$PAYLOG_HOME`, else `~/.paylog`.
pub fn paylog_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("PAYLOG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".paylog"))
}

pub fn ensure_paylog_home() -> Result<PathBuf> {
    let dir = paylog_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_store_path() -> Result<PathBuf> {
    Ok(ensure_paylog_home()?.join("store.json"))
}
