//! Filter configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OiError, Result};

use super::glob::GlobPattern;

/// An inclusive numeric range. A missing bound is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Bounds {
    /// Accept every value.
    pub const UNBOUNDED: Bounds = Bounds {
        min: None,
        max: None,
    };

    /// Inclusive range `[min, max]`.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Whether `value` lies within the range, ends included.
    ///
    /// NaN is only contained by a fully unbounded range.
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    /// Whether the interval `[start, end]` shares any point with the range.
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.min.is_none_or(|min| end >= min) && self.max.is_none_or(|max| start <= max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    fn validate(&self, name: &str) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min.is_nan() || max.is_nan() || min > max {
                return Err(OiError::Config(format!(
                    "{name}: invalid range [{min}, {max}]"
                )));
            }
        }
        Ok(())
    }
}

/// What to keep when filtering a dataset.
///
/// The default accepts everything: every name pattern is `*`, every range
/// is unbounded and every toggle is on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Pattern for OI_ARRAY names and measurement `arrname` references.
    pub arrname: GlobPattern,
    /// Pattern for OI_WAVELENGTH names and measurement `insname` references.
    pub insname: GlobPattern,
    /// Pattern for OI_CORR names and measurement `corrname` references.
    pub corrname: GlobPattern,
    /// Keep only this target, renumbered to 1.
    pub target_id: Option<i32>,
    /// Observation epoch \[MJD\].
    pub mjd_range: Bounds,
    /// Channel central wavelength \[m\].
    pub wavelength_range: Bounds,
    /// Projected baseline length \[m\].
    pub baseline_range: Bounds,
    /// Baseline length divided by wavelength \[cycles/rad\].
    pub uv_radius_range: Bounds,
    /// Signal-to-noise ratio of each channel.
    pub snr_range: Bounds,
    pub accept_vis: bool,
    /// Keep VISAMP content; otherwise it is replaced by NaN.
    pub accept_visamp: bool,
    /// Keep VISPHI content; otherwise it is replaced by NaN.
    pub accept_visphi: bool,
    pub accept_vis2: bool,
    /// Keep T3AMP content; otherwise it is replaced by NaN.
    pub accept_t3amp: bool,
    /// Keep T3PHI content; otherwise it is replaced by NaN.
    pub accept_t3phi: bool,
    pub accept_flux: bool,
    pub accept_inspol: bool,
    /// Keep records in which every channel is flagged.
    pub accept_flagged: bool,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            arrname: GlobPattern::any(),
            insname: GlobPattern::any(),
            corrname: GlobPattern::any(),
            target_id: None,
            mjd_range: Bounds::UNBOUNDED,
            wavelength_range: Bounds::UNBOUNDED,
            baseline_range: Bounds::UNBOUNDED,
            uv_radius_range: Bounds::UNBOUNDED,
            snr_range: Bounds::UNBOUNDED,
            accept_vis: true,
            accept_visamp: true,
            accept_visphi: true,
            accept_vis2: true,
            accept_t3amp: true,
            accept_t3phi: true,
            accept_flux: true,
            accept_inspol: true,
            accept_flagged: true,
        }
    }
}

impl FilterSpec {
    /// Create a specification that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a specification from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let spec: FilterSpec = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Load a specification from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| OiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check that every range is well formed.
    pub fn validate(&self) -> Result<()> {
        self.mjd_range.validate("mjd_range")?;
        self.wavelength_range.validate("wavelength_range")?;
        self.baseline_range.validate("baseline_range")?;
        self.uv_radius_range.validate("uv_radius_range")?;
        self.snr_range.validate("snr_range")?;
        Ok(())
    }

    pub fn with_arrname(mut self, pattern: &str) -> Result<Self> {
        self.arrname = GlobPattern::new(pattern)?;
        Ok(self)
    }

    pub fn with_insname(mut self, pattern: &str) -> Result<Self> {
        self.insname = GlobPattern::new(pattern)?;
        Ok(self)
    }

    pub fn with_corrname(mut self, pattern: &str) -> Result<Self> {
        self.corrname = GlobPattern::new(pattern)?;
        Ok(self)
    }

    pub fn with_target_id(mut self, target_id: i32) -> Self {
        self.target_id = Some(target_id);
        self
    }

    pub fn with_mjd_range(mut self, range: Bounds) -> Self {
        self.mjd_range = range;
        self
    }

    pub fn with_wavelength_range(mut self, range: Bounds) -> Self {
        self.wavelength_range = range;
        self
    }

    pub fn with_baseline_range(mut self, range: Bounds) -> Self {
        self.baseline_range = range;
        self
    }

    pub fn with_uv_radius_range(mut self, range: Bounds) -> Self {
        self.uv_radius_range = range;
        self
    }

    pub fn with_snr_range(mut self, range: Bounds) -> Self {
        self.snr_range = range;
        self
    }

    pub fn with_accept_flagged(mut self, accept: bool) -> Self {
        self.accept_flagged = accept;
        self
    }
}
