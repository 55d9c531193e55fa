//! Fixture loading and management.

use std::path::Path;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

/// Schema version written by [`FixtureSet::new`].
pub const FIXTURE_VERSION: &str = "v1";

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Function being tested.
    pub function: String,
    /// C standard / POSIX section reference.
    pub spec_section: String,
    /// Input parameters (serialized).
    pub inputs: serde_json::Value,
    /// Expected output (serialized as string for comparison).
    #[serde(deserialize_with = "deserialize_expected_output")]
    pub expected_output: String,
}

/// A collection of fixture cases for a function family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Function family name.
    pub family: String,
    /// Where the expectations came from (`hand-written`, `host-libc`, ...).
    #[serde(default)]
    pub source: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Create an empty set for `family`.
    #[must_use]
    pub fn new(family: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            version: String::from(FIXTURE_VERSION),
            family: family.into(),
            source: source.into(),
            cases: Vec::new(),
        }
    }

    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let set = Self::from_json(&content)?;
        Ok(set)
    }

    /// Load every `*.json` fixture set in `dir`, sorted by file name.
    ///
    /// Files that fail to parse are returned alongside their error instead of
    /// aborting the whole load.
    pub fn load_dir(
        dir: &Path,
    ) -> Result<(Vec<Self>, Vec<(std::path::PathBuf, String)>), Box<dyn std::error::Error>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut sets = Vec::new();
        let mut skipped = Vec::new();
        for path in paths {
            match Self::from_file(&path) {
                Ok(set) => sets.push(set),
                Err(err) => skipped.push((path, err.to_string())),
            }
        }
        Ok((sets, skipped))
    }

    /// Append a case.
    pub fn push(
        &mut self,
        name: impl Into<String>,
        function: impl Into<String>,
        spec_section: impl Into<String>,
        inputs: serde_json::Value,
        expected: &serde_json::Value,
    ) {
        self.cases.push(FixtureCase {
            name: name.into(),
            function: function.into(),
            spec_section: spec_section.into(),
            inputs,
            expected_output: normalize_expected_output_value(expected),
        });
    }
}

fn deserialize_expected_output<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(normalize_expected_output_value(&value))
}

/// Canonical string form of an expected or actual result.
///
/// Strings are taken verbatim; any other JSON value is rendered compactly.
pub fn normalize_expected_output_value(value: &serde_json::Value) -> String {
    if let Some(text) = value.as_str() {
        return text.to_string();
    }
    serde_json::to_string(value).unwrap_or_else(|_| String::from("null"))
}
