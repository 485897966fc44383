// ⚙️ Shelter Configuration - JSON file, every field optional
//
// Example:
// {
//   "center_name": "Harbor Street Shelter",
//   "intake_window_days": 90,
//   "seed": 42,
//   "demo_adopters": ["Alice", "Bob"]
// }

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelterConfig {
    /// Signs adoption certificates and the console greeting
    pub center_name: String,

    /// Mock intake dates fall within this many days before the reference date
    pub intake_window_days: u32,

    /// Mock ages are drawn from min_age..=max_age
    pub min_age: u32,
    pub max_age: u32,

    /// Fixed seed for the mock roster (None = seeded from the OS)
    pub seed: Option<u64>,

    /// Adopters served, in order, by the batch adoption run
    pub demo_adopters: Vec<String>,
}

impl Default for ShelterConfig {
    fn default() -> Self {
        ShelterConfig {
            center_name: "Keyin Animal Adoption Center".to_string(),
            intake_window_days: 180,
            min_age: 1,
            max_age: 10,
            seed: None,
            demo_adopters: ["Alice", "Bob", "Charlie", "Diana", "Ethan"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ShelterConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let config: ShelterConfig =
            serde_json::from_str(content).context("Failed to parse config JSON")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.center_name.trim().is_empty() {
            bail!("center_name must not be empty");
        }
        if self.intake_window_days == 0 {
            bail!("intake_window_days must be at least 1");
        }
        if self.min_age > self.max_age {
            bail!(
                "min_age ({}) must not exceed max_age ({})",
                self.min_age,
                self.max_age
            );
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
