//! Target table (OI_TARGET).

use serde::{Deserialize, Serialize};

/// A single observed target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Identifier referenced by measurement records.
    pub target_id: i32,
    /// Target name. Not required to be unique.
    pub target: String,
    /// Right ascension at the equinox \[deg\].
    #[serde(default)]
    pub raep0: f64,
    /// Declination at the equinox \[deg\].
    #[serde(default)]
    pub decep0: f64,
    #[serde(default)]
    pub equinox: f64,
    #[serde(default)]
    pub ra_err: f64,
    #[serde(default)]
    pub dec_err: f64,
    /// Systemic radial velocity \[m/s\].
    #[serde(default)]
    pub sysvel: f64,
    #[serde(default)]
    pub veltyp: String,
    #[serde(default)]
    pub veldef: String,
    /// Proper motion in RA \[deg/yr\].
    #[serde(default)]
    pub pmra: f64,
    /// Proper motion in declination \[deg/yr\].
    #[serde(default)]
    pub pmdec: f64,
    #[serde(default)]
    pub pmra_err: f64,
    #[serde(default)]
    pub pmdec_err: f64,
    /// Parallax \[deg\].
    #[serde(default)]
    pub parallax: f64,
    #[serde(default)]
    pub para_err: f64,
    #[serde(default)]
    pub spectyp: String,
    /// "SCI" or "CAL" (OIFITS2 only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Target {
    /// Create a target with the given id and name, all other fields zeroed.
    pub fn new(target_id: i32, name: impl Into<String>) -> Self {
        Self {
            target_id,
            target: name.into(),
            ..Self::default()
        }
    }
}

/// The dataset's one OI_TARGET table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetTable {
    /// Table revision number.
    pub revision: i32,
    /// Targets in file order.
    pub targets: Vec<Target>,
}

impl TargetTable {
    /// Create an empty target table at the current revision.
    pub fn new() -> Self {
        Self {
            revision: super::OIFITS2_REVISION,
            targets: Vec::new(),
        }
    }

    /// Look up a target by id. Returns the first match if ids repeat.
    pub fn by_id(&self, target_id: i32) -> Option<&Target> {
        self.targets.iter().find(|t| t.target_id == target_id)
    }

    /// Look up a target by name. Returns the first match.
    pub fn by_name(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.target == name)
    }

    /// Append a target.
    pub fn push(&mut self, target: Target) {
        self.targets.push(target);
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl Default for TargetTable {
    fn default() -> Self {
        Self::new()
    }
}
