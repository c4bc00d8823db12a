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
    scripts: HashMap<String, String>,
    configs: HashMap<String, String>,
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

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Keyframe scripts (`*.kf`).
pub mod scripts {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.scripts.keys().cloned().collect()
    }

    pub fn text(name: &str) -> Result<String> {
        read_to_string(lookup(&MANIFEST.scripts, "script", name)?)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(resolve_path(lookup(&MANIFEST.scripts, "script", name)?))
    }
}

/// Animator configurations (JSON).
pub mod configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.configs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        read_to_string(lookup(&MANIFEST.configs, "config", name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        let text = read_to_string(rel)?;
        serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_resolves() {
        for name in scripts::keys() {
            assert!(scripts::path(&name).unwrap().is_file(), "missing script {name}");
        }
        for name in configs::keys() {
            configs::json(&name).unwrap();
        }
        assert!(scripts::text("nope").is_err());
    }
}
