#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub fixtures: Vec<ManifestEntry>,
}

/// A stored value and what each renderer must make of it.
///
/// `stored` holds a JSON value that is serialized before use; `stored_raw`
/// holds the exact stored string for inputs that are not JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub stored: Option<Value>,
    #[serde(default)]
    pub stored_raw: Option<String>,
    pub html: String,
    pub text: String,
    #[serde(default)]
    pub blocks: Option<usize>,
}

impl Fixture {
    pub fn input(&self) -> String {
        match (&self.stored_raw, &self.stored) {
            (Some(raw), _) => raw.clone(),
            (None, Some(value)) => value.to_string(),
            (None, None) => panic!("fixture has neither stored nor stored_raw"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FixtureRecord {
    pub entry: ManifestEntry,
    pub fixture: Fixture,
}

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn load_manifest() -> Manifest {
    let path = fixtures_dir().join("manifest.json");
    let data = fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {e}", path));
    serde_json::from_str(&data).unwrap_or_else(|e| panic!("failed to parse {:?}: {e}", path))
}

pub fn load_fixture_record(dir: &Path, entry: &ManifestEntry) -> FixtureRecord {
    let path = dir.join(&entry.file);
    let data = fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {e}", path));
    let fixture =
        serde_json::from_str(&data).unwrap_or_else(|e| panic!("failed to parse {:?}: {e}", path));
    FixtureRecord {
        entry: entry.clone(),
        fixture,
    }
}

pub fn load_all_fixture_records() -> Vec<FixtureRecord> {
    let dir = fixtures_dir();
    load_manifest()
        .fixtures
        .iter()
        .map(|entry| load_fixture_record(&dir, entry))
        .collect()
}

pub fn load_fixture(name: &str) -> Fixture {
    load_all_fixture_records()
        .into_iter()
        .find(|record| record.entry.name == name)
        .unwrap_or_else(|| panic!("no fixture named {name}"))
        .fixture
}
