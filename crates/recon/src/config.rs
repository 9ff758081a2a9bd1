use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Reconciliation configuration, deserialized from TOML and passed
/// explicitly into each component. Reloading is constructing a new value;
/// there are no process-wide globals.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconConfig {
    /// Maximum |statement date − ledger date| for a pair, in days.
    #[serde(default = "default_tolerance_days")]
    pub tolerance_days: u32,
    /// Extra margin added to the tolerance when bounding the ledger
    /// query window around the statement's date span.
    #[serde(default = "default_widen_days")]
    pub widen_days: u32,
    /// Category assigned when every other inference step comes up empty.
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Bank account recorded on non-cash imported lines.
    #[serde(default = "default_account")]
    pub default_account: String,
    /// Raw counterparty string → canonical name.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    /// Keyword rules tried first during category inference, in order.
    #[serde(default)]
    pub category_rules: Vec<CategoryRule>,
    /// Boilerplate substrings stripped from memos before resolution.
    #[serde(default)]
    pub boilerplate_prefixes: Vec<String>,
    /// Aging bucket edges in days, strictly increasing.
    #[serde(default = "default_bucket_edges")]
    pub bucket_edges: Vec<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRule {
    pub keyword: String,
    pub category: String,
}

fn default_tolerance_days() -> u32 {
    2
}

fn default_widen_days() -> u32 {
    7
}

fn default_category() -> String {
    "其他".to_string()
}

fn default_account() -> String {
    "银行".to_string()
}

fn default_bucket_edges() -> Vec<u32> {
    vec![30, 60, 90, 180]
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            tolerance_days: default_tolerance_days(),
            widen_days: default_widen_days(),
            default_category: default_category(),
            default_account: default_account(),
            aliases: HashMap::new(),
            category_rules: Vec::new(),
            boilerplate_prefixes: Vec::new(),
            bucket_edges: default_bucket_edges(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.bucket_edges.is_empty() {
            return Err(ReconError::ConfigValidation(
                "bucket_edges must not be empty".into(),
            ));
        }
        if !self.bucket_edges.windows(2).all(|w| w[0] < w[1]) {
            return Err(ReconError::ConfigValidation(format!(
                "bucket_edges must be strictly increasing, got {:?}",
                self.bucket_edges
            )));
        }
        for rule in &self.category_rules {
            if rule.keyword.trim().is_empty() {
                return Err(ReconError::ConfigValidation(
                    "category rule with empty keyword".into(),
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
