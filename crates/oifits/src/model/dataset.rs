//! The `Dataset` aggregate.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::lookup::{LookupIndex, MissingReference, ReferenceKind};

use super::array::{ArrayTable, Element};
use super::corr::CorrTable;
use super::header::Header;
use super::measurement::{
    FluxTable, InsPolTable, MeasurementTable, T3Table, Vis2Table, VisTable,
};
use super::target::{Target, TargetTable};
use super::wavelength::WavelengthTable;

/// A complete OIFITS dataset held in memory.
///
/// Array, wavelength and correlation tables are only reachable through
/// methods so that the lookup index stays in step with them. Measurement
/// tables are plain public vectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "DatasetParts")]
pub struct Dataset {
    pub header: Header,
    pub targets: TargetTable,
    arrays: Vec<ArrayTable>,
    wavelengths: Vec<WavelengthTable>,
    corrs: Vec<CorrTable>,
    pub inspol: Vec<InsPolTable>,
    pub vis: Vec<VisTable>,
    pub vis2: Vec<Vis2Table>,
    pub t3: Vec<T3Table>,
    pub flux: Vec<FluxTable>,
    #[serde(skip)]
    index: LookupIndex,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arrays(&self) -> &[ArrayTable] {
        &self.arrays
    }

    pub fn wavelengths(&self) -> &[WavelengthTable] {
        &self.wavelengths
    }

    pub fn corrs(&self) -> &[CorrTable] {
        &self.corrs
    }

    /// The lookup index over this dataset's named tables.
    pub fn index(&self) -> &LookupIndex {
        &self.index
    }

    /// Append an array table. A table whose name is already present is kept
    /// but cannot be looked up.
    pub fn add_array(&mut self, table: ArrayTable) {
        self.index.insert_array(&table.arrname, self.arrays.len());
        self.arrays.push(table);
    }

    /// Append a wavelength table.
    pub fn add_wavelength(&mut self, table: WavelengthTable) {
        self.index
            .insert_wavelength(&table.insname, self.wavelengths.len());
        self.wavelengths.push(table);
    }

    /// Append a correlation table.
    pub fn add_corr(&mut self, table: CorrTable) {
        self.index.insert_corr(&table.corrname, self.corrs.len());
        self.corrs.push(table);
    }

    /// Remove the array table named `arrname`.
    pub fn remove_array(&mut self, arrname: &str) -> Option<ArrayTable> {
        let pos = self.index.array(arrname)?;
        let table = self.arrays.remove(pos);
        self.reindex();
        Some(table)
    }

    /// Remove the wavelength table named `insname`.
    pub fn remove_wavelength(&mut self, insname: &str) -> Option<WavelengthTable> {
        let pos = self.index.wavelength(insname)?;
        let table = self.wavelengths.remove(pos);
        self.reindex();
        Some(table)
    }

    /// Remove the correlation table named `corrname`.
    pub fn remove_corr(&mut self, corrname: &str) -> Option<CorrTable> {
        let pos = self.index.corr(corrname)?;
        let table = self.corrs.remove(pos);
        self.reindex();
        Some(table)
    }

    /// Keep only the array tables for which `keep` returns true. Returns the
    /// number removed.
    pub fn retain_arrays(&mut self, keep: impl FnMut(&ArrayTable) -> bool) -> usize {
        let before = self.arrays.len();
        self.arrays.retain(keep);
        self.removed_since(before, self.arrays.len())
    }

    pub fn retain_wavelengths(&mut self, keep: impl FnMut(&WavelengthTable) -> bool) -> usize {
        let before = self.wavelengths.len();
        self.wavelengths.retain(keep);
        self.removed_since(before, self.wavelengths.len())
    }

    pub fn retain_corrs(&mut self, keep: impl FnMut(&CorrTable) -> bool) -> usize {
        let before = self.corrs.len();
        self.corrs.retain(keep);
        self.removed_since(before, self.corrs.len())
    }

    fn removed_since(&mut self, before: usize, after: usize) -> usize {
        if after != before {
            self.reindex();
        }
        before - after
    }

    /// Mutable access to the lookup tables for in-crate rewrites that keep
    /// names unchanged.
    pub(crate) fn lookup_tables_mut(
        &mut self,
    ) -> (&mut [ArrayTable], &mut [WavelengthTable], &mut [CorrTable]) {
        (&mut self.arrays, &mut self.wavelengths, &mut self.corrs)
    }

    fn reindex(&mut self) {
        self.index = LookupIndex::build(&self.arrays, &self.wavelengths, &self.corrs);
    }

    pub fn lookup_array(&self, arrname: &str) -> Option<&ArrayTable> {
        self.index.array(arrname).map(|pos| &self.arrays[pos])
    }

    pub fn lookup_wavelength(&self, insname: &str) -> Option<&WavelengthTable> {
        self.index.wavelength(insname).map(|pos| &self.wavelengths[pos])
    }

    pub fn lookup_corr(&self, corrname: &str) -> Option<&CorrTable> {
        self.index.corr(corrname).map(|pos| &self.corrs[pos])
    }

    pub fn lookup_target(&self, target_id: i32) -> Option<&Target> {
        self.targets.by_id(target_id)
    }

    /// Find station `sta_index` in the array named `arrname`.
    pub fn lookup_element(&self, arrname: &str, sta_index: i32) -> Option<&Element> {
        self.lookup_array(arrname)?.element(sta_index)
    }

    /// Number of measurement tables of all kinds, OI_INSPOL included.
    pub fn num_measurement_tables(&self) -> usize {
        self.vis.len() + self.vis2.len() + self.t3.len() + self.flux.len() + self.inspol.len()
    }

    /// Find table references that do not resolve through the lookup index.
    ///
    /// Each one is also logged as a warning. These are not errors: the
    /// conformity checks decide whether they matter.
    pub fn missing_references(&self) -> Vec<MissingReference> {
        let mut missing = Vec::new();
        self.collect_missing(&self.vis, &mut missing);
        self.collect_missing(&self.vis2, &mut missing);
        self.collect_missing(&self.t3, &mut missing);
        self.collect_missing(&self.flux, &mut missing);

        for (i, table) in self.inspol.iter().enumerate() {
            let mut push = |reference, name: &str| {
                missing.push(MissingReference {
                    table: super::TableKind::InsPol,
                    position: i + 1,
                    reference,
                    name: name.to_string(),
                });
            };
            if self.index.array(&table.arrname).is_none() {
                push(ReferenceKind::Array, &table.arrname);
            }
            let mut seen: Vec<&str> = Vec::new();
            for record in &table.records {
                let insname = record.insname.as_str();
                if self.index.wavelength(insname).is_none() && !seen.contains(&insname) {
                    seen.push(insname);
                    push(ReferenceKind::Wavelength, insname);
                }
            }
        }

        for m in &missing {
            warn!("{m}");
        }
        missing
    }

    fn collect_missing<T: MeasurementTable>(
        &self,
        tables: &[T],
        missing: &mut Vec<MissingReference>,
    ) {
        for (i, table) in tables.iter().enumerate() {
            let mut push = |reference, name: &str| {
                missing.push(MissingReference {
                    table: T::KIND,
                    position: i + 1,
                    reference,
                    name: name.to_string(),
                });
            };
            if self.index.wavelength(table.insname()).is_none() {
                push(ReferenceKind::Wavelength, table.insname());
            }
            if let Some(arrname) = table.arrname() {
                if self.index.array(arrname).is_none() {
                    push(ReferenceKind::Array, arrname);
                }
            }
            if let Some(corrname) = table.corrname() {
                if self.index.corr(corrname).is_none() {
                    push(ReferenceKind::Corr, corrname);
                }
            }
        }
    }
}

/// Serialized form of a [`Dataset`]; the lookup index is derived on load.
#[derive(Deserialize)]
struct DatasetParts {
    #[serde(default)]
    header: Header,
    #[serde(default)]
    targets: TargetTable,
    #[serde(default)]
    arrays: Vec<ArrayTable>,
    #[serde(default)]
    wavelengths: Vec<WavelengthTable>,
    #[serde(default)]
    corrs: Vec<CorrTable>,
    #[serde(default)]
    inspol: Vec<InsPolTable>,
    #[serde(default)]
    vis: Vec<VisTable>,
    #[serde(default)]
    vis2: Vec<Vis2Table>,
    #[serde(default)]
    t3: Vec<T3Table>,
    #[serde(default)]
    flux: Vec<FluxTable>,
}

impl From<DatasetParts> for Dataset {
    fn from(parts: DatasetParts) -> Self {
        let mut dataset = Dataset {
            header: parts.header,
            targets: parts.targets,
            arrays: parts.arrays,
            wavelengths: parts.wavelengths,
            corrs: parts.corrs,
            inspol: parts.inspol,
            vis: parts.vis,
            vis2: parts.vis2,
            t3: parts.t3,
            flux: parts.flux,
            index: LookupIndex::default(),
        };
        dataset.reindex();
        dataset.missing_references();
        dataset
    }
}
