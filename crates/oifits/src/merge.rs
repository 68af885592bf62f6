//! Union of several datasets.
//!
//! Targets are identified by name and renumbered 1, 2, 3, … in order of
//! first appearance. Wavelength and correlation tables are shared between
//! inputs when their contents are equivalent and renamed when a different
//! table already holds the name. Measurement tables are copied without their
//! array reference, since array tables are not carried over.

use std::collections::HashMap;

use log::{debug, warn};

use crate::model::{ChannelRecord, Dataset, Header, MeasurementTable, TargetTable};

/// Largest difference in wavelength, bandwidth or correlation value at which
/// two tables are considered the same.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Merges datasets.
#[derive(Debug, Clone, Copy)]
pub struct MergeEngine {
    tolerance: f64,
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Name and id rewrites for one input dataset.
#[derive(Debug, Default)]
struct InputMap {
    insnames: HashMap<String, String>,
    corrnames: HashMap<String, String>,
    target_ids: HashMap<i32, i32>,
}

impl MergeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the equivalence tolerance for wavelength and correlation tables.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Merge `inputs` in order into a new dataset.
    ///
    /// Any number of inputs is accepted; merging one dataset renumbers its
    /// targets and drops its array tables.
    pub fn merge<'a>(&self, inputs: impl IntoIterator<Item = &'a Dataset>) -> Dataset {
        let inputs: Vec<&Dataset> = inputs.into_iter().collect();
        let mut output = Dataset::new();
        output.header = Header::merged(inputs.iter().map(|d| &d.header));

        let names = merge_targets(&inputs, &mut output.targets);

        let mut maps = Vec::with_capacity(inputs.len());
        for input in &inputs {
            let mut map = InputMap::default();
            for target in &input.targets.targets {
                if let Some(&id) = names.get(target.target.as_str()) {
                    map.target_ids.entry(target.target_id).or_insert(id);
                }
            }
            self.merge_wavelengths(input, &mut output, &mut map);
            self.merge_corrs(input, &mut output, &mut map);
            maps.push(map);
        }

        for (input, map) in inputs.iter().zip(&maps) {
            copy_tables(&input.vis, map, &mut output.vis);
            copy_tables(&input.vis2, map, &mut output.vis2);
            copy_tables(&input.t3, map, &mut output.t3);
            copy_tables(&input.flux, map, &mut output.flux);
            if !input.inspol.is_empty() {
                debug!("{} OI_INSPOL tables not merged", input.inspol.len());
            }
        }

        output
    }

    fn merge_wavelengths(&self, input: &Dataset, output: &mut Dataset, map: &mut InputMap) {
        for table in input.wavelengths() {
            if map.insnames.contains_key(&table.insname) {
                continue;
            }
            let existing = output
                .wavelengths()
                .iter()
                .find(|t| t.is_equivalent(table, self.tolerance));
            if let Some(existing) = existing {
                map.insnames
                    .insert(table.insname.clone(), existing.insname.clone());
                continue;
            }

            let mut copy = table.clone();
            if output.lookup_wavelength(&copy.insname).is_some() {
                copy.insname = unique_name("WAVELENGTH", output.wavelengths().len(), |name| {
                    output.lookup_wavelength(name).is_some()
                });
                debug!(
                    "OI_WAVELENGTH INSNAME='{}' renamed to '{}'",
                    table.insname, copy.insname
                );
            }
            map.insnames.insert(table.insname.clone(), copy.insname.clone());
            output.add_wavelength(copy);
        }
    }

    fn merge_corrs(&self, input: &Dataset, output: &mut Dataset, map: &mut InputMap) {
        for table in input.corrs() {
            if map.corrnames.contains_key(&table.corrname) {
                continue;
            }
            let existing = output
                .corrs()
                .iter()
                .find(|t| t.is_equivalent(table, self.tolerance));
            if let Some(existing) = existing {
                map.corrnames
                    .insert(table.corrname.clone(), existing.corrname.clone());
                continue;
            }

            let mut copy = table.clone();
            if output.lookup_corr(&copy.corrname).is_some() {
                copy.corrname = unique_name("CORR", output.corrs().len(), |name| {
                    output.lookup_corr(name).is_some()
                });
                debug!(
                    "OI_CORR CORRNAME='{}' renamed to '{}'",
                    table.corrname, copy.corrname
                );
            }
            map.corrnames
                .insert(table.corrname.clone(), copy.corrname.clone());
            output.add_corr(copy);
        }
    }
}

/// Merge `inputs` with the default tolerance.
pub fn merge<'a>(inputs: impl IntoIterator<Item = &'a Dataset>) -> Dataset {
    MergeEngine::default().merge(inputs)
}

/// Fill `output` with one target per distinct name and return the
/// name → new id map.
fn merge_targets<'a>(inputs: &[&'a Dataset], output: &mut TargetTable) -> HashMap<&'a str, i32> {
    let mut names = HashMap::new();
    output.revision = inputs
        .iter()
        .map(|d| d.targets.revision)
        .max()
        .unwrap_or(output.revision);

    for input in inputs {
        for target in &input.targets.targets {
            if names.contains_key(target.target.as_str()) {
                continue;
            }
            let id = output.len() as i32 + 1;
            names.insert(target.target.as_str(), id);
            let mut target = target.clone();
            target.target_id = id;
            output.push(target);
        }
    }
    names
}

/// First of `{prefix}{count + 1}`, `{prefix}{count + 2}`, … not taken.
fn unique_name(prefix: &str, count: usize, taken: impl Fn(&str) -> bool) -> String {
    (count + 1..)
        .map(|n| format!("{prefix}{n}"))
        .find(|name| !taken(name))
        .unwrap_or_else(|| prefix.to_string())
}

fn copy_tables<T>(tables: &[T], map: &InputMap, output: &mut Vec<T>)
where
    T: MeasurementTable,
    T::Record: Clone,
{
    for (i, table) in tables.iter().enumerate() {
        let mut copy = table.without_records();
        copy.set_arrname(None);
        if let Some(insname) = map.insnames.get(table.insname()) {
            copy.set_insname(insname.clone());
        }
        if let Some(corrname) = table.corrname().and_then(|name| map.corrnames.get(name)) {
            copy.set_corrname(Some(corrname.clone()));
        }

        for record in table.records() {
            match map.target_ids.get(&record.target_id()) {
                Some(&target_id) => {
                    let mut record = record.clone();
                    record.set_target_id(target_id);
                    copy.records_mut().push(record);
                }
                None => warn!(
                    "{} #{}: record with unknown TARGET_ID={} dropped",
                    T::KIND,
                    i + 1,
                    record.target_id()
                ),
            }
        }

        if copy.records().is_empty() && !table.records().is_empty() {
            warn!("{} #{} removed: no record targets resolved", T::KIND, i + 1);
            continue;
        }
        output.push(copy);
    }
}
