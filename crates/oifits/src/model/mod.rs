//! In-memory OIFITS data model.

mod array;
mod corr;
mod dataset;
mod header;
mod measurement;
mod summary;
mod target;
mod wavelength;

pub use array::{ArrayTable, Element};
pub use corr::{CorrEntry, CorrTable};
pub use dataset::Dataset;
pub use header::{Header, MULTIPLE_VALUES};
pub use measurement::{
    CalStat, ChannelRecord, Complex, FluxRecord, FluxTable, InsPolRecord, InsPolTable,
    MeasurementTable, T3Record, T3Table, TableKind, Vis2Record, Vis2Table, VisRecord, VisTable,
};
pub use summary::{DatasetSummary, KindSummary};
pub use target::{Target, TargetTable};
pub use wavelength::{Channel, WavelengthTable};

/// Table revision written by OIFITS version 2 for tables that existed in
/// version 1.
pub const OIFITS2_REVISION: i32 = 2;

/// Serde helpers for per-channel values: NaN is written as JSON `null` and
/// `null` reads back as NaN.
pub(crate) mod nan_as_null {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            if value.is_nan() {
                seq.serialize_element(&None::<f64>)?;
            } else {
                seq.serialize_element(value)?;
            }
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let values: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
        Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}

/// Copy the elements of `values` whose mask entry is set, preserving order.
pub(crate) fn repack<T: Clone>(values: &[T], mask: &[bool]) -> Vec<T> {
    values
        .iter()
        .zip(mask)
        .filter(|(_, keep)| **keep)
        .map(|(v, _)| v.clone())
        .collect()
}
