use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    tweens: HashMap<String, TweenEntry>,
    #[serde(default)]
    configs: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TweenEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        valid: Option<bool>,
    },
}

impl TweenEntry {
    fn as_path(&self) -> &str {
        match self {
            TweenEntry::Path(path) => path,
            TweenEntry::Detailed { path, .. } => path,
        }
    }

    fn is_valid(&self) -> bool {
        match self {
            TweenEntry::Path(_) => true,
            TweenEntry::Detailed { valid, .. } => valid.unwrap_or(true),
        }
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Tween descriptions, deserializable into `TweenParams`.
pub mod tweens {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.tweens.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Fixtures expected to pass validation.
    pub fn valid_keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST
            .tweens
            .iter()
            .filter(|(_, entry)| entry.is_valid())
            .map(|(name, _)| name.clone())
            .collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.tweens, "tween", name)?;
        read_to_string(entry.as_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.tweens, "tween", name)?;
        super::load_json(entry.as_path())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.tweens, "tween", name)?;
        Ok(resolve_path(entry.as_path()))
    }
}

/// Scheduler configurations, deserializable into `Config`.
pub mod configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.configs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        super::load_json(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_exists() {
        for name in tweens::keys() {
            let path = tweens::path(&name).expect("path");
            assert!(path.exists(), "missing tween fixture {}", path.display());
        }
        for name in configs::keys() {
            configs::json(&name).expect("config fixture readable");
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert!(tweens::json("no-such-tween").is_err());
    }
}
