//! Golden learning scenarios stored as JSON under `golden/learning/`.

use std::path::PathBuf;

use chrono::{Duration, Utc};
use lexis_core::models::{Correction, TypeDefinition};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("golden").exists() {
        if path.ends_with("test-fixtures") && path.join("golden").exists() {
            return path;
        }
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioCorrection {
    pub predicted_type: String,
    pub corrected_type: Option<String>,
    #[serde(default)]
    pub document_keywords: Vec<String>,
}

/// A correction history, a target definition, and the expected learning outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenScenario {
    pub description: String,
    pub file_type: String,
    #[serde(default)]
    pub curated_keywords: Vec<String>,
    pub corrections: Vec<ScenarioCorrection>,
    pub expected_reason: String,
    #[serde(default)]
    pub expected_learned: Vec<String>,
    #[serde(default)]
    pub expected_not_learned: Vec<String>,
    pub expected_correction_count: Option<u32>,
}

impl GoldenScenario {
    /// Corrections with fresh ids, one second apart, oldest first.
    pub fn build_corrections(&self) -> Vec<Correction> {
        let total = self.corrections.len() as i64;
        self.corrections
            .iter()
            .enumerate()
            .map(|(i, c)| Correction {
                id: uuid::Uuid::new_v4().to_string(),
                predicted_type: c.predicted_type.clone(),
                corrected_type: c.corrected_type.clone(),
                document_keywords: c.document_keywords.clone(),
                created_at: Utc::now() - Duration::seconds(total - i as i64),
            })
            .collect()
    }

    pub fn build_definition(&self) -> TypeDefinition {
        TypeDefinition::new(self.file_type.clone(), self.curated_keywords.clone())
    }
}

/// Load `golden/learning/<name>.json`.
pub fn load_scenario(name: &str) -> GoldenScenario {
    load_fixture(&format!("golden/learning/{name}.json"))
}

/// Names of every shipped learning scenario.
pub const SCENARIOS: &[&str] = &[
    "redbook_valuation",
    "curated_case_insensitive",
    "below_threshold",
    "split_patterns",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().join("golden").exists(), "golden directory not found");
    }

    #[test]
    fn all_golden_learning_files_exist() {
        for name in SCENARIOS {
            let file = format!("golden/learning/{name}.json");
            assert!(fixture_exists(&file), "Missing fixture: {}", file);
        }
    }

    #[test]
    fn scenarios_parse() {
        for name in SCENARIOS {
            let scenario = load_scenario(name);
            assert!(!scenario.corrections.is_empty(), "{name} has no corrections");
            assert!(!scenario.description.is_empty());
        }
    }

    #[test]
    fn built_corrections_preserve_order() {
        let scenario = load_scenario("redbook_valuation");
        let built = scenario.build_corrections();
        assert!(built.windows(2).all(|w| w[0].created_at < w[1].created_at));
    }
}
