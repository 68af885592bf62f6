//! Table and data point counts for a dataset.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::measurement::{ChannelRecord, MeasurementTable};

/// Counts for one measurement kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindSummary {
    pub tables: usize,
    pub records: usize,
    /// Total channel values (records × channels).
    pub channels: usize,
    /// Channel values not flagged.
    pub unflagged: usize,
}

impl KindSummary {
    fn of<T: MeasurementTable>(tables: &[T]) -> Self {
        let mut summary = KindSummary {
            tables: tables.len(),
            ..Self::default()
        };
        for record in tables.iter().flat_map(|t| t.records()) {
            summary.records += 1;
            summary.channels += record.flags().len();
            summary.unflagged += record.flags().iter().filter(|&&f| !f).count();
        }
        summary
    }
}

/// Overview of what a dataset contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub targets: usize,
    pub arrays: usize,
    pub wavelengths: usize,
    pub corrs: usize,
    pub inspol_tables: usize,
    pub inspol_records: usize,
    pub vis: KindSummary,
    pub vis2: KindSummary,
    pub t3: KindSummary,
    pub flux: KindSummary,
}

impl DatasetSummary {
    /// Unflagged data points across VIS, VIS2, T3 and FLUX.
    pub fn unflagged_points(&self) -> usize {
        self.vis.unflagged + self.vis2.unflagged + self.t3.unflagged + self.flux.unflagged
    }
}

impl Dataset {
    /// Count the contents of this dataset.
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            targets: self.targets.len(),
            arrays: self.arrays().len(),
            wavelengths: self.wavelengths().len(),
            corrs: self.corrs().len(),
            inspol_tables: self.inspol.len(),
            inspol_records: self.inspol.iter().map(|t| t.records.len()).sum(),
            vis: KindSummary::of(&self.vis),
            vis2: KindSummary::of(&self.vis2),
            t3: KindSummary::of(&self.t3),
            flux: KindSummary::of(&self.flux),
        }
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Targets: {}", self.targets)?;
        writeln!(
            f,
            "Arrays: {}  Wavelength tables: {}  Correlation tables: {}",
            self.arrays, self.wavelengths, self.corrs
        )?;
        for (name, kind) in [
            ("OI_VIS", &self.vis),
            ("OI_VIS2", &self.vis2),
            ("OI_T3", &self.t3),
            ("OI_FLUX", &self.flux),
        ] {
            writeln!(
                f,
                "{name:8} {} tables, {} records, {} unflagged of {} points",
                kind.tables, kind.records, kind.unflagged, kind.channels
            )?;
        }
        write!(
            f,
            "OI_INSPOL {} tables, {} records",
            self.inspol_tables, self.inspol_records
        )
    }
}
