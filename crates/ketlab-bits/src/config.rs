//! Experiment literals and their YAML override.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BitsError, BitsResult};

/// Half-open character range with Python slice semantics.
///
/// Negative bounds count from the end; out-of-range bounds are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceRange {
    #[serde(default)]
    pub start: Option<isize>,
    #[serde(default)]
    pub end: Option<isize>,
}

impl SliceRange {
    pub fn new(start: isize, end: isize) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Resolve against a sequence of `len` items to concrete `start..end`.
    pub fn resolve(&self, len: usize) -> std::ops::Range<usize> {
        let clamp = |bound: isize| -> usize {
            let len_i = isize::try_from(len).unwrap_or(isize::MAX);
            let b = if bound < 0 { bound + len_i } else { bound };
            usize::try_from(b.clamp(0, len_i)).unwrap_or(0)
        };
        let start = self.start.map_or(0, clamp);
        let end = self.end.map_or(len, clamp);
        start..end.max(start)
    }
}

/// Literals driving [`BitSignExperiment`](crate::BitSignExperiment).
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```yaml
/// digits: "0110"
/// shape: [2, 2]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// Text that gets sliced.
    pub slice_text: String,
    /// Range taken from `slice_text`.
    pub slice: SliceRange,
    /// Scalar assigned and then never used.
    pub scalar: i64,
    /// Text split on whitespace.
    pub split_text: String,
    /// Digit string mapped to the sign array.
    pub digits: String,
    /// Shape of the discarded reshape.
    pub shape: (usize, usize),
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            slice_text: "0123".into(),
            slice: SliceRange::new(0, 2),
            scalar: 2,
            split_text: "1010".into(),
            digits: "1010".into(),
            shape: (1, 4),
        }
    }
}

impl ExperimentConfig {
    /// Parse YAML, keeping defaults for absent keys.
    pub fn from_yaml_str(yaml: &str) -> BitsResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Read and parse a YAML file.
    pub fn load(path: &Path) -> BitsResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| BitsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn to_yaml(&self) -> BitsResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}
