use std::collections::HashMap;

use serde::Deserialize;

use crate::error::CompareError;
use crate::normalize::{CANON_DISTANCIA, CANON_VALOR, CANON_VOUCHER};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Optional run configuration. The defaults need no config file at all;
/// a TOML file can add column aliases or relax the duplicate policy:
///
/// ```toml
/// on_duplicate = "first"
///
/// [aliases]
/// "nº voucher" = "voucher"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareConfig {
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
    /// Extra source label → canonical name mappings, applied after the
    /// built-in alias table. Keys are matched trimmed/lowercased.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

/// What to do when a voucher repeats within one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the run with a list of the offending vouchers.
    Error,
    /// Keep the first occurrence, count the rest in the summary.
    First,
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        Self::Error
    }
}

impl CompareConfig {
    pub fn from_toml(config_str: &str) -> Result<Self, CompareError> {
        let mut config: CompareConfig =
            toml::from_str(config_str).map_err(|e| CompareError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Normalize alias keys and reject targets outside the canonical set.
    fn validate(&mut self) -> Result<(), CompareError> {
        let mut normalized = HashMap::new();
        for (source, target) in &self.aliases {
            if !matches!(target.as_str(), CANON_VOUCHER | CANON_VALOR | CANON_DISTANCIA) {
                return Err(CompareError::ConfigValidation(format!(
                    "alias '{source}' maps to unknown column '{target}' \
                     (expected '{CANON_VOUCHER}', '{CANON_VALOR}' or '{CANON_DISTANCIA}')"
                )));
            }
            normalized.insert(source.trim().to_lowercase(), target.clone());
        }
        self.aliases = normalized;
        Ok(())
    }
}
