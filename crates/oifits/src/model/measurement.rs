//! Measurement tables: OI_VIS, OI_VIS2, OI_T3, OI_FLUX and OI_INSPOL.
//!
//! Every record of a measurement table carries per-channel vectors whose
//! length is the table's `nwave`, which in turn must equal the channel count
//! of the wavelength table named by `insname`.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{OiError, Result};

use super::{OIFITS2_REVISION, repack};

/// The kinds of table that hold per-channel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Vis,
    Vis2,
    T3,
    Flux,
    InsPol,
}

impl TableKind {
    /// FITS extension name for this kind.
    pub fn extname(&self) -> &'static str {
        match self {
            TableKind::Vis => "OI_VIS",
            TableKind::Vis2 => "OI_VIS2",
            TableKind::T3 => "OI_T3",
            TableKind::Flux => "OI_FLUX",
            TableKind::InsPol => "OI_INSPOL",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extname())
    }
}

/// A complex number as stored in OI_INSPOL Jones matrices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

/// Common access to a record with per-channel data and flags.
pub trait ChannelRecord {
    fn target_id(&self) -> i32;

    fn set_target_id(&mut self, target_id: i32);

    /// Observation epoch \[MJD\].
    fn mjd(&self) -> f64;

    fn flags(&self) -> &[bool];

    fn flags_mut(&mut self) -> &mut [bool];

    /// Lengths of every per-channel vector, flags included.
    fn channel_lengths(&self) -> Vec<usize>;

    /// Keep only the channels whose mask entry is set.
    fn retain_channels(&mut self, mask: &[bool]);

    /// Station indices into the table's array.
    fn station_indices(&self) -> &[i32];

    /// Every per-channel error vector of this record.
    fn error_bars(&self) -> Vec<&[f64]>;

    /// True when every channel is flagged (or there are no channels).
    fn all_flagged(&self) -> bool {
        self.flags().iter().all(|&f| f)
    }
}

/// Common access to the tables holding [`ChannelRecord`]s.
pub trait MeasurementTable {
    type Record: ChannelRecord;

    const KIND: TableKind;

    fn insname(&self) -> &str;

    fn arrname(&self) -> Option<&str>;

    fn corrname(&self) -> Option<&str>;

    fn nwave(&self) -> usize;

    fn records(&self) -> &[Self::Record];

    fn records_mut(&mut self) -> &mut Vec<Self::Record>;

    fn set_nwave(&mut self, nwave: usize);

    fn set_insname(&mut self, insname: String);

    fn set_arrname(&mut self, arrname: Option<String>);

    fn set_corrname(&mut self, corrname: Option<String>);

    /// Copy of the table's keywords with no records.
    fn without_records(&self) -> Self
    where
        Self: Sized;
}

macro_rules! measurement_table {
    ($table:ident, $record:ident, $kind:expr) => {
        impl $table {
            /// Append a record, checking its channel vectors against `nwave`.
            pub fn push(&mut self, record: $record) -> Result<()> {
                if let Some(&found) = record.channel_lengths().iter().find(|&&n| n != self.nwave) {
                    return Err(OiError::ChannelCount {
                        table: format!("{} insname={}", $kind, self.insname),
                        expected: self.nwave,
                        found,
                    });
                }
                self.records.push(record);
                Ok(())
            }

            /// Set the array reference.
            pub fn with_arrname(mut self, arrname: impl Into<String>) -> Self {
                self.arrname = Some(arrname.into());
                self
            }

            /// Set the correlation reference.
            pub fn with_corrname(mut self, corrname: impl Into<String>) -> Self {
                self.corrname = Some(corrname.into());
                self
            }

            pub fn len(&self) -> usize {
                self.records.len()
            }

            pub fn is_empty(&self) -> bool {
                self.records.is_empty()
            }
        }

        impl MeasurementTable for $table {
            type Record = $record;

            const KIND: TableKind = $kind;

            fn insname(&self) -> &str {
                &self.insname
            }

            fn arrname(&self) -> Option<&str> {
                self.arrname.as_deref()
            }

            fn corrname(&self) -> Option<&str> {
                self.corrname.as_deref()
            }

            fn nwave(&self) -> usize {
                self.nwave
            }

            fn records(&self) -> &[$record] {
                &self.records
            }

            fn records_mut(&mut self) -> &mut Vec<$record> {
                &mut self.records
            }

            fn set_nwave(&mut self, nwave: usize) {
                self.nwave = nwave;
            }

            fn set_insname(&mut self, insname: String) {
                self.insname = insname;
            }

            fn set_arrname(&mut self, arrname: Option<String>) {
                self.arrname = arrname;
            }

            fn set_corrname(&mut self, corrname: Option<String>) {
                self.corrname = corrname;
            }

            fn without_records(&self) -> Self {
                self.copy_keywords()
            }
        }
    };
}

// =============================================================================
// OI_VIS
// =============================================================================

/// A complex visibility measurement on one baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisRecord {
    pub target_id: i32,
    #[serde(default)]
    pub time: f64,
    pub mjd: f64,
    #[serde(default)]
    pub int_time: f64,
    #[serde(with = "crate::model::nan_as_null")]
    pub visamp: Vec<f64>,
    #[serde(with = "crate::model::nan_as_null")]
    pub visamperr: Vec<f64>,
    /// Differential or absolute phase \[deg\].
    #[serde(with = "crate::model::nan_as_null")]
    pub visphi: Vec<f64>,
    #[serde(with = "crate::model::nan_as_null")]
    pub visphierr: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrindx_visamp: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrindx_visphi: Option<i32>,
    /// Baseline coordinates \[m\].
    pub ucoord: f64,
    pub vcoord: f64,
    pub sta_index: [i32; 2],
    pub flag: Vec<bool>,
}

impl VisRecord {
    /// Projected baseline length \[m\].
    pub fn baseline(&self) -> f64 {
        self.ucoord.hypot(self.vcoord)
    }
}

impl ChannelRecord for VisRecord {
    fn target_id(&self) -> i32 {
        self.target_id
    }

    fn set_target_id(&mut self, target_id: i32) {
        self.target_id = target_id;
    }

    fn mjd(&self) -> f64 {
        self.mjd
    }

    fn flags(&self) -> &[bool] {
        &self.flag
    }

    fn flags_mut(&mut self) -> &mut [bool] {
        &mut self.flag
    }

    fn channel_lengths(&self) -> Vec<usize> {
        vec![
            self.visamp.len(),
            self.visamperr.len(),
            self.visphi.len(),
            self.visphierr.len(),
            self.flag.len(),
        ]
    }

    fn retain_channels(&mut self, mask: &[bool]) {
        self.visamp = repack(&self.visamp, mask);
        self.visamperr = repack(&self.visamperr, mask);
        self.visphi = repack(&self.visphi, mask);
        self.visphierr = repack(&self.visphierr, mask);
        self.flag = repack(&self.flag, mask);
    }

    fn station_indices(&self) -> &[i32] {
        &self.sta_index
    }

    fn error_bars(&self) -> Vec<&[f64]> {
        vec![self.visamperr.as_slice(), self.visphierr.as_slice()]
    }
}

/// An OI_VIS table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisTable {
    pub revision: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_obs: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrname: Option<String>,
    pub insname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrname: Option<String>,
    /// "absolute", "differential", "correlated flux".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amptyp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phityp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amporder: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phiorder: Option<i32>,
    pub nwave: usize,
    pub records: Vec<VisRecord>,
}

impl VisTable {
    /// Create an empty table for the given instrument and channel count.
    pub fn new(insname: impl Into<String>, nwave: usize) -> Self {
        Self {
            revision: OIFITS2_REVISION,
            date_obs: None,
            arrname: None,
            insname: insname.into(),
            corrname: None,
            amptyp: None,
            phityp: None,
            amporder: None,
            phiorder: None,
            nwave,
            records: Vec::new(),
        }
    }

    fn copy_keywords(&self) -> Self {
        Self {
            revision: self.revision,
            date_obs: self.date_obs,
            arrname: self.arrname.clone(),
            insname: self.insname.clone(),
            corrname: self.corrname.clone(),
            amptyp: self.amptyp.clone(),
            phityp: self.phityp.clone(),
            amporder: self.amporder,
            phiorder: self.phiorder,
            nwave: self.nwave,
            records: Vec::new(),
        }
    }
}

measurement_table!(VisTable, VisRecord, TableKind::Vis);

// =============================================================================
// OI_VIS2
// =============================================================================

/// A squared visibility measurement on one baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vis2Record {
    pub target_id: i32,
    #[serde(default)]
    pub time: f64,
    pub mjd: f64,
    #[serde(default)]
    pub int_time: f64,
    #[serde(with = "crate::model::nan_as_null")]
    pub vis2data: Vec<f64>,
    #[serde(with = "crate::model::nan_as_null")]
    pub vis2err: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrindx_vis2data: Option<i32>,
    pub ucoord: f64,
    pub vcoord: f64,
    pub sta_index: [i32; 2],
    pub flag: Vec<bool>,
}

impl Vis2Record {
    /// Projected baseline length \[m\].
    pub fn baseline(&self) -> f64 {
        self.ucoord.hypot(self.vcoord)
    }
}

impl ChannelRecord for Vis2Record {
    fn target_id(&self) -> i32 {
        self.target_id
    }

    fn set_target_id(&mut self, target_id: i32) {
        self.target_id = target_id;
    }

    fn mjd(&self) -> f64 {
        self.mjd
    }

    fn flags(&self) -> &[bool] {
        &self.flag
    }

    fn flags_mut(&mut self) -> &mut [bool] {
        &mut self.flag
    }

    fn channel_lengths(&self) -> Vec<usize> {
        vec![self.vis2data.len(), self.vis2err.len(), self.flag.len()]
    }

    fn retain_channels(&mut self, mask: &[bool]) {
        self.vis2data = repack(&self.vis2data, mask);
        self.vis2err = repack(&self.vis2err, mask);
        self.flag = repack(&self.flag, mask);
    }

    fn station_indices(&self) -> &[i32] {
        &self.sta_index
    }

    fn error_bars(&self) -> Vec<&[f64]> {
        vec![self.vis2err.as_slice()]
    }
}

/// An OI_VIS2 table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vis2Table {
    pub revision: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_obs: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrname: Option<String>,
    pub insname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrname: Option<String>,
    pub nwave: usize,
    pub records: Vec<Vis2Record>,
}

impl Vis2Table {
    /// Create an empty table for the given instrument and channel count.
    pub fn new(insname: impl Into<String>, nwave: usize) -> Self {
        Self {
            revision: OIFITS2_REVISION,
            date_obs: None,
            arrname: None,
            insname: insname.into(),
            corrname: None,
            nwave,
            records: Vec::new(),
        }
    }

    fn copy_keywords(&self) -> Self {
        Self {
            revision: self.revision,
            date_obs: self.date_obs,
            arrname: self.arrname.clone(),
            insname: self.insname.clone(),
            corrname: self.corrname.clone(),
            nwave: self.nwave,
            records: Vec::new(),
        }
    }
}

measurement_table!(Vis2Table, Vis2Record, TableKind::Vis2);

// =============================================================================
// OI_T3
// =============================================================================

/// A triple product (closure) measurement on a triangle of stations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct T3Record {
    pub target_id: i32,
    #[serde(default)]
    pub time: f64,
    pub mjd: f64,
    #[serde(default)]
    pub int_time: f64,
    #[serde(with = "crate::model::nan_as_null")]
    pub t3amp: Vec<f64>,
    #[serde(with = "crate::model::nan_as_null")]
    pub t3amperr: Vec<f64>,
    /// Closure phase \[deg\].
    #[serde(with = "crate::model::nan_as_null")]
    pub t3phi: Vec<f64>,
    #[serde(with = "crate::model::nan_as_null")]
    pub t3phierr: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrindx_t3amp: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrindx_t3phi: Option<i32>,
    /// First baseline, stations 1 → 2 \[m\].
    pub u1coord: f64,
    pub v1coord: f64,
    /// Second baseline, stations 2 → 3 \[m\].
    pub u2coord: f64,
    pub v2coord: f64,
    pub sta_index: [i32; 3],
    pub flag: Vec<bool>,
}

impl T3Record {
    /// Lengths of the three sides of the closure triangle \[m\].
    pub fn baselines(&self) -> [f64; 3] {
        [
            self.u1coord.hypot(self.v1coord),
            self.u2coord.hypot(self.v2coord),
            (self.u1coord + self.u2coord).hypot(self.v1coord + self.v2coord),
        ]
    }
}

impl ChannelRecord for T3Record {
    fn target_id(&self) -> i32 {
        self.target_id
    }

    fn set_target_id(&mut self, target_id: i32) {
        self.target_id = target_id;
    }

    fn mjd(&self) -> f64 {
        self.mjd
    }

    fn flags(&self) -> &[bool] {
        &self.flag
    }

    fn flags_mut(&mut self) -> &mut [bool] {
        &mut self.flag
    }

    fn channel_lengths(&self) -> Vec<usize> {
        vec![
            self.t3amp.len(),
            self.t3amperr.len(),
            self.t3phi.len(),
            self.t3phierr.len(),
            self.flag.len(),
        ]
    }

    fn retain_channels(&mut self, mask: &[bool]) {
        self.t3amp = repack(&self.t3amp, mask);
        self.t3amperr = repack(&self.t3amperr, mask);
        self.t3phi = repack(&self.t3phi, mask);
        self.t3phierr = repack(&self.t3phierr, mask);
        self.flag = repack(&self.flag, mask);
    }

    fn station_indices(&self) -> &[i32] {
        &self.sta_index
    }

    fn error_bars(&self) -> Vec<&[f64]> {
        vec![self.t3amperr.as_slice(), self.t3phierr.as_slice()]
    }
}

/// An OI_T3 table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct T3Table {
    pub revision: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_obs: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrname: Option<String>,
    pub insname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrname: Option<String>,
    pub nwave: usize,
    pub records: Vec<T3Record>,
}

impl T3Table {
    /// Create an empty table for the given instrument and channel count.
    pub fn new(insname: impl Into<String>, nwave: usize) -> Self {
        Self {
            revision: OIFITS2_REVISION,
            date_obs: None,
            arrname: None,
            insname: insname.into(),
            corrname: None,
            nwave,
            records: Vec::new(),
        }
    }

    fn copy_keywords(&self) -> Self {
        Self {
            revision: self.revision,
            date_obs: self.date_obs,
            arrname: self.arrname.clone(),
            insname: self.insname.clone(),
            corrname: self.corrname.clone(),
            nwave: self.nwave,
            records: Vec::new(),
        }
    }
}

measurement_table!(T3Table, T3Record, TableKind::T3);

// =============================================================================
// OI_FLUX
// =============================================================================

/// Calibration status of an OI_FLUX table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalStat {
    #[default]
    Calibrated,
    Uncalibrated,
}

/// A spectral flux measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FluxRecord {
    pub target_id: i32,
    pub mjd: f64,
    #[serde(default)]
    pub int_time: f64,
    #[serde(with = "crate::model::nan_as_null")]
    pub fluxdata: Vec<f64>,
    #[serde(with = "crate::model::nan_as_null")]
    pub fluxerr: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrindx_fluxdata: Option<i32>,
    /// Station, only present for uncalibrated flux.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sta_index: Option<i32>,
    pub flag: Vec<bool>,
}

impl ChannelRecord for FluxRecord {
    fn target_id(&self) -> i32 {
        self.target_id
    }

    fn set_target_id(&mut self, target_id: i32) {
        self.target_id = target_id;
    }

    fn mjd(&self) -> f64 {
        self.mjd
    }

    fn flags(&self) -> &[bool] {
        &self.flag
    }

    fn flags_mut(&mut self) -> &mut [bool] {
        &mut self.flag
    }

    fn channel_lengths(&self) -> Vec<usize> {
        vec![self.fluxdata.len(), self.fluxerr.len(), self.flag.len()]
    }

    fn retain_channels(&mut self, mask: &[bool]) {
        self.fluxdata = repack(&self.fluxdata, mask);
        self.fluxerr = repack(&self.fluxerr, mask);
        self.flag = repack(&self.flag, mask);
    }

    fn station_indices(&self) -> &[i32] {
        self.sta_index.as_slice()
    }

    fn error_bars(&self) -> Vec<&[f64]> {
        vec![self.fluxerr.as_slice()]
    }
}

/// An OI_FLUX table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxTable {
    pub revision: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_obs: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrname: Option<String>,
    pub insname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrname: Option<String>,
    #[serde(default)]
    pub calstat: CalStat,
    /// Aperture field of view \[arcsec\].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fov: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fovtype: Option<String>,
    pub nwave: usize,
    pub records: Vec<FluxRecord>,
}

impl FluxTable {
    /// Create an empty table for the given instrument and channel count.
    pub fn new(insname: impl Into<String>, nwave: usize) -> Self {
        Self {
            revision: 1,
            date_obs: None,
            arrname: None,
            insname: insname.into(),
            corrname: None,
            calstat: CalStat::Calibrated,
            fov: None,
            fovtype: None,
            nwave,
            records: Vec::new(),
        }
    }

    fn copy_keywords(&self) -> Self {
        Self {
            revision: self.revision,
            date_obs: self.date_obs,
            arrname: self.arrname.clone(),
            insname: self.insname.clone(),
            corrname: self.corrname.clone(),
            calstat: self.calstat,
            fov: self.fov,
            fovtype: self.fovtype.clone(),
            nwave: self.nwave,
            records: Vec::new(),
        }
    }
}

measurement_table!(FluxTable, FluxRecord, TableKind::Flux);

// =============================================================================
// OI_INSPOL
// =============================================================================

/// Instrumental polarisation (Jones matrix) for one station and interval.
///
/// Unlike the other measurement records, each record names its own
/// wavelength table, so channel counts may differ between records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsPolRecord {
    pub target_id: i32,
    pub insname: String,
    /// Start of validity \[MJD\].
    pub mjd_obs: f64,
    /// End of validity \[MJD\].
    pub mjd_end: f64,
    pub jxx: Vec<Complex>,
    pub jyy: Vec<Complex>,
    pub jxy: Vec<Complex>,
    pub jyx: Vec<Complex>,
    pub sta_index: i32,
}

impl InsPolRecord {
    /// Lengths of the four Jones matrix vectors.
    pub fn channel_lengths(&self) -> [usize; 4] {
        [self.jxx.len(), self.jyy.len(), self.jxy.len(), self.jyx.len()]
    }

    /// Keep only the channels whose mask entry is set.
    pub fn retain_channels(&mut self, mask: &[bool]) {
        self.jxx = repack(&self.jxx, mask);
        self.jyy = repack(&self.jyy, mask);
        self.jxy = repack(&self.jxy, mask);
        self.jyx = repack(&self.jyx, mask);
    }
}

/// An OI_INSPOL table. Always tied to an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsPolTable {
    pub revision: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_obs: Option<NaiveDate>,
    pub arrname: String,
    /// Orientation of the Jones matrix, e.g. "NORTH" or "LABORATORY".
    #[serde(default)]
    pub orient: String,
    #[serde(default)]
    pub model: String,
    pub records: Vec<InsPolRecord>,
}

impl InsPolTable {
    pub fn new(arrname: impl Into<String>) -> Self {
        Self {
            revision: 1,
            date_obs: None,
            arrname: arrname.into(),
            orient: String::new(),
            model: String::new(),
            records: Vec::new(),
        }
    }

    /// Copy of the table's keywords with no records.
    pub fn without_records(&self) -> Self {
        Self {
            revision: self.revision,
            date_obs: self.date_obs,
            arrname: self.arrname.clone(),
            orient: self.orient.clone(),
            model: self.model.clone(),
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vis2_record(nwave: usize) -> Vis2Record {
        Vis2Record {
            target_id: 1,
            mjd: 59000.0,
            vis2data: vec![0.5; nwave],
            vis2err: vec![0.05; nwave],
            ucoord: 30.0,
            vcoord: 40.0,
            sta_index: [1, 2],
            flag: vec![false; nwave],
            ..Default::default()
        }
    }

    #[test]
    fn test_push_checks_channel_count() {
        let mut table = Vis2Table::new("INS", 3);
        assert!(table.push(vis2_record(3)).is_ok());

        let err = table.push(vis2_record(2)).unwrap_err();
        match err {
            OiError::ChannelCount { expected, found, .. } => {
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_baselines() {
        let record = vis2_record(1);
        assert!((record.baseline() - 50.0).abs() < 1e-12);

        let t3 = T3Record {
            u1coord: 3.0,
            v1coord: 0.0,
            u2coord: 0.0,
            v2coord: 4.0,
            ..Default::default()
        };
        let [a, b, c] = t3.baselines();
        assert_eq!((a, b), (3.0, 4.0));
        assert!((c - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_retain_channels() {
        let mut record = VisRecord {
            visamp: vec![1.0, 2.0, 3.0],
            visamperr: vec![0.1, 0.2, 0.3],
            visphi: vec![10.0, 20.0, 30.0],
            visphierr: vec![1.0, 2.0, 3.0],
            flag: vec![false, true, false],
            ..Default::default()
        };
        record.retain_channels(&[true, false, true]);

        assert_eq!(record.visamp, vec![1.0, 3.0]);
        assert_eq!(record.visphierr, vec![1.0, 3.0]);
        assert_eq!(record.flag, vec![false, false]);
        assert!(record.channel_lengths().iter().all(|&n| n == 2));
    }

    #[test]
    fn test_flux_station_indices() {
        let mut record = FluxRecord::default();
        assert!(record.station_indices().is_empty());
        record.sta_index = Some(4);
        assert_eq!(record.station_indices(), &[4]);
    }

    #[test]
    fn test_table_kind_extname() {
        assert_eq!(TableKind::Vis2.to_string(), "OI_VIS2");
        assert_eq!(TableKind::InsPol.extname(), "OI_INSPOL");
    }
}
