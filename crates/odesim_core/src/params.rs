use crate::error::{OdeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named physical parameters of one system instance.
///
/// The set is frozen once built: there is no mutating accessor, so a system
/// holding one can hand out shared references freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    values: BTreeMap<String, f64>,
}

impl ParameterSet {
    pub fn new<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        Self {
            values: entries
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Checks that every key in `required` is present.
    /// All missing keys are reported together, in the order they were requested.
    pub fn validate(&self, system: &str, required: &[&str]) -> Result<()> {
        let missing: Vec<String> = required
            .iter()
            .filter(|key| !self.contains(key))
            .map(|key| key.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(OdeError::MissingParameter {
                system: system.to_string(),
                keys: missing,
            })
        }
    }

    /// Looks up a key that `validate` has already vouched for.
    pub(crate) fn require(&self, system: &str, name: &str) -> Result<f64> {
        self.get(name).ok_or_else(|| OdeError::MissingParameter {
            system: system.to_string(),
            keys: vec![name.to_string()],
        })
    }
}
