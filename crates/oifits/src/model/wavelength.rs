//! Wavelength tables (OI_WAVELENGTH).

use serde::{Deserialize, Serialize};

use super::repack;

/// A spectral channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Central wavelength \[m\].
    pub eff_wave: f64,
    /// Effective bandwidth \[m\].
    pub eff_band: f64,
}

impl Channel {
    pub fn new(eff_wave: f64, eff_band: f64) -> Self {
        Self { eff_wave, eff_band }
    }
}

/// An OI_WAVELENGTH table, identified by `insname`.
///
/// The channel count of this table is the per-channel vector length of every
/// measurement table that names it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WavelengthTable {
    pub revision: i32,
    pub insname: String,
    pub channels: Vec<Channel>,
}

impl WavelengthTable {
    /// Create an empty wavelength table.
    pub fn new(insname: impl Into<String>) -> Self {
        Self {
            revision: super::OIFITS2_REVISION,
            insname: insname.into(),
            channels: Vec::new(),
        }
    }

    /// Create a wavelength table from (wavelength, bandwidth) pairs.
    pub fn with_channels(
        insname: impl Into<String>,
        channels: impl IntoIterator<Item = (f64, f64)>,
    ) -> Self {
        let mut table = Self::new(insname);
        table.channels = channels
            .into_iter()
            .map(|(eff_wave, eff_band)| Channel::new(eff_wave, eff_band))
            .collect();
        table
    }

    /// Number of channels.
    pub fn nwave(&self) -> usize {
        self.channels.len()
    }

    /// Iterate central wavelengths.
    pub fn eff_waves(&self) -> impl Iterator<Item = f64> + '_ {
        self.channels.iter().map(|c| c.eff_wave)
    }

    /// Whether two tables describe the same channels.
    ///
    /// Names and revisions are ignored; channel counts must be equal and every
    /// wavelength and bandwidth must agree within `tolerance`.
    pub fn is_equivalent(&self, other: &WavelengthTable, tolerance: f64) -> bool {
        self.channels.len() == other.channels.len()
            && self
                .channels
                .iter()
                .zip(&other.channels)
                .all(|(a, b)| {
                    (a.eff_wave - b.eff_wave).abs() <= tolerance
                        && (a.eff_band - b.eff_band).abs() <= tolerance
                })
    }

    /// Copy of this table keeping only channels whose mask entry is set.
    pub fn masked(&self, mask: &[bool]) -> WavelengthTable {
        WavelengthTable {
            revision: self.revision,
            insname: self.insname.clone(),
            channels: repack(&self.channels, mask),
        }
    }
}
