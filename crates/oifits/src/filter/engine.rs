//! Referentially consistent subsetting of a dataset.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use log::{debug, warn};

use crate::model::{
    ChannelRecord, Dataset, FluxRecord, InsPolTable, MeasurementTable, T3Record, TargetTable,
    Vis2Record, VisRecord,
};

use super::spec::FilterSpec;

/// Phase errors are in degrees; one radian of phase error is an SNR of 1.
const RAD_TO_DEG: f64 = 180.0 / PI;

/// Applies a [`FilterSpec`] to datasets.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    spec: FilterSpec,
}

impl FilterEngine {
    /// Create an engine for the given filter.
    pub fn new(spec: FilterSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// Produce a new dataset holding the accepted subset of `input`.
    ///
    /// The output never references a lookup table it does not contain, and
    /// keeps no array, wavelength, correlation or polarisation table that
    /// nothing references.
    pub fn apply(&self, input: &Dataset) -> Dataset {
        let spec = &self.spec;
        let mut output = Dataset::new();
        output.header = input.header.clone();

        let targets = TargetSelection::new(spec.target_id, &input.targets);
        output.targets = targets.filter_table(&input.targets);

        for table in input.arrays() {
            if spec.arrname.matches(&table.arrname) {
                output.add_array(table.clone());
            }
        }
        for table in input.corrs() {
            if spec.corrname.matches(&table.corrname) {
                output.add_corr(table.clone());
            }
        }

        let mut masks: HashMap<String, ChannelMask> = HashMap::new();
        for table in input.wavelengths() {
            if !spec.insname.matches(&table.insname) || masks.contains_key(&table.insname) {
                continue;
            }
            let keep: Vec<bool> = table
                .eff_waves()
                .map(|wave| spec.wavelength_range.contains(wave))
                .collect();
            let masked = table.masked(&keep);
            if masked.nwave() == 0 {
                warn!(
                    "OI_WAVELENGTH INSNAME='{}' removed: no channels in wavelength range",
                    table.insname
                );
                continue;
            }
            masks.insert(
                table.insname.clone(),
                ChannelMask {
                    keep,
                    waves: masked.eff_waves().collect(),
                },
            );
            output.add_wavelength(masked);
        }

        let pass = FilterPass {
            spec,
            masks: &masks,
            targets,
        };

        if spec.accept_vis && (spec.accept_visamp || spec.accept_visphi) {
            output.vis = pass.filter_tables(&input.vis);
        }
        if spec.accept_vis2 {
            output.vis2 = pass.filter_tables(&input.vis2);
        }
        if spec.accept_t3amp || spec.accept_t3phi {
            output.t3 = pass.filter_tables(&input.t3);
        }
        if spec.accept_flux {
            output.flux = pass.filter_tables(&input.flux);
        }
        if spec.accept_inspol {
            output.inspol = pass.filter_inspol(&input.inspol);
        }

        prune_orphans(&mut output);
        output
    }
}

/// Filter `input` with `spec`.
pub fn filter(input: &Dataset, spec: &FilterSpec) -> Dataset {
    FilterEngine::new(spec.clone()).apply(input)
}

/// Channels kept from one wavelength table.
#[derive(Debug)]
struct ChannelMask {
    /// One entry per input channel.
    keep: Vec<bool>,
    /// Central wavelengths of the kept channels.
    waves: Vec<f64>,
}

/// Which input target ids survive, and what they become.
#[derive(Debug, Clone, Copy)]
enum TargetSelection {
    All,
    Only(i32),
    Nothing,
}

impl TargetSelection {
    fn new(target_id: Option<i32>, targets: &TargetTable) -> Self {
        match target_id {
            None => TargetSelection::All,
            Some(id) if targets.by_id(id).is_some() => TargetSelection::Only(id),
            Some(id) => {
                warn!("TARGET_ID={id} not present; no records can be accepted");
                TargetSelection::Nothing
            }
        }
    }

    fn filter_table(&self, input: &TargetTable) -> TargetTable {
        let mut output = TargetTable {
            revision: input.revision,
            targets: Vec::new(),
        };
        match *self {
            TargetSelection::All => output.targets = input.targets.clone(),
            TargetSelection::Only(id) => {
                if let Some(target) = input.by_id(id) {
                    let mut target = target.clone();
                    target.target_id = 1;
                    output.push(target);
                }
            }
            TargetSelection::Nothing => {}
        }
        output
    }

    /// Output id for a record's target, or `None` if it is rejected.
    fn remap(&self, target_id: i32) -> Option<i32> {
        match *self {
            TargetSelection::All => Some(target_id),
            TargetSelection::Only(id) => (target_id == id).then_some(1),
            TargetSelection::Nothing => None,
        }
    }
}

/// Per-kind parts of record filtering.
trait FilterRecord: ChannelRecord + Clone {
    /// Projected baseline lengths that must all lie in range \[m\].
    fn baselines(&self) -> Vec<f64>;

    /// SNR values of one channel. NaN entries are not tested.
    fn channel_snrs(&self, channel: usize) -> [f64; 2];

    /// Replace content `spec` excludes with NaN.
    fn disable_content(&mut self, _spec: &FilterSpec) {}
}

fn ratio(values: &[f64], errors: &[f64], channel: usize) -> f64 {
    match (values.get(channel), errors.get(channel)) {
        (Some(value), Some(error)) => value / error,
        _ => f64::NAN,
    }
}

fn phase_snr(errors: &[f64], channel: usize) -> f64 {
    errors.get(channel).map_or(f64::NAN, |error| RAD_TO_DEG / error)
}

fn blank(values: &mut [f64]) {
    values.fill(f64::NAN);
}

impl FilterRecord for VisRecord {
    fn baselines(&self) -> Vec<f64> {
        vec![self.baseline()]
    }

    fn channel_snrs(&self, channel: usize) -> [f64; 2] {
        [
            ratio(&self.visamp, &self.visamperr, channel),
            phase_snr(&self.visphierr, channel),
        ]
    }

    fn disable_content(&mut self, spec: &FilterSpec) {
        if !spec.accept_visamp {
            blank(&mut self.visamp);
            blank(&mut self.visamperr);
        }
        if !spec.accept_visphi {
            blank(&mut self.visphi);
            blank(&mut self.visphierr);
        }
    }
}

impl FilterRecord for Vis2Record {
    fn baselines(&self) -> Vec<f64> {
        vec![self.baseline()]
    }

    fn channel_snrs(&self, channel: usize) -> [f64; 2] {
        [ratio(&self.vis2data, &self.vis2err, channel), f64::NAN]
    }
}

impl FilterRecord for T3Record {
    fn baselines(&self) -> Vec<f64> {
        T3Record::baselines(self).to_vec()
    }

    fn channel_snrs(&self, channel: usize) -> [f64; 2] {
        [
            ratio(&self.t3amp, &self.t3amperr, channel),
            phase_snr(&self.t3phierr, channel),
        ]
    }

    fn disable_content(&mut self, spec: &FilterSpec) {
        if !spec.accept_t3amp {
            blank(&mut self.t3amp);
            blank(&mut self.t3amperr);
        }
        if !spec.accept_t3phi {
            blank(&mut self.t3phi);
            blank(&mut self.t3phierr);
        }
    }
}

impl FilterRecord for FluxRecord {
    fn baselines(&self) -> Vec<f64> {
        Vec::new()
    }

    fn channel_snrs(&self, channel: usize) -> [f64; 2] {
        [ratio(&self.fluxdata, &self.fluxerr, channel), f64::NAN]
    }
}

/// State shared by the measurement passes of one `apply` call.
struct FilterPass<'a> {
    spec: &'a FilterSpec,
    masks: &'a HashMap<String, ChannelMask>,
    targets: TargetSelection,
}

impl FilterPass<'_> {
    fn filter_tables<T>(&self, tables: &[T]) -> Vec<T>
    where
        T: MeasurementTable,
        T::Record: FilterRecord,
    {
        let spec = self.spec;
        let mut output = Vec::new();

        for (i, table) in tables.iter().enumerate() {
            let label = format!("{} #{} (INSNAME='{}')", T::KIND, i + 1, table.insname());

            // An absent ARRNAME or CORRNAME is matched as the empty string.
            let names_match = spec.insname.matches(table.insname())
                && spec.arrname.matches(table.arrname().unwrap_or(""))
                && spec.corrname.matches(table.corrname().unwrap_or(""));
            if !names_match {
                debug!("{label} skipped: name not selected");
                continue;
            }
            let Some(mask) = self.masks.get(table.insname()) else {
                debug!("{label} skipped: no accepted wavelength table");
                continue;
            };
            if mask.keep.len() != table.nwave() {
                warn!(
                    "{label} skipped: NWAVE={} but wavelength table has {} channels",
                    table.nwave(),
                    mask.keep.len()
                );
                continue;
            }

            let mut filtered = table.without_records();
            filtered.set_nwave(mask.waves.len());
            for record in table.records() {
                if let Some(record) = self.filter_record(record, mask) {
                    filtered.records_mut().push(record);
                }
            }

            if filtered.records().is_empty() {
                warn!("{label} removed: no records accepted");
                continue;
            }
            output.push(filtered);
        }
        output
    }

    fn filter_record<R: FilterRecord>(&self, record: &R, mask: &ChannelMask) -> Option<R> {
        let spec = self.spec;
        let target_id = self.targets.remap(record.target_id())?;
        if !spec.mjd_range.contains(record.mjd()) {
            return None;
        }
        let baselines = record.baselines();
        if !baselines.iter().all(|&b| spec.baseline_range.contains(b)) {
            return None;
        }

        let mut record = record.clone();
        record.retain_channels(&mask.keep);
        record.disable_content(spec);

        let reject: Vec<bool> = mask
            .waves
            .iter()
            .enumerate()
            .map(|(channel, &wave)| {
                let uv_ok = baselines
                    .iter()
                    .all(|&b| spec.uv_radius_range.contains(b / wave));
                let snr_ok = record
                    .channel_snrs(channel)
                    .iter()
                    .filter(|snr| !snr.is_nan())
                    .all(|&snr| spec.snr_range.contains(snr));
                !(uv_ok && snr_ok)
            })
            .collect();
        for (flag, reject) in record.flags_mut().iter_mut().zip(reject) {
            *flag |= reject;
        }

        if !spec.accept_flagged && record.all_flagged() {
            return None;
        }
        record.set_target_id(target_id);
        Some(record)
    }

    fn filter_inspol(&self, tables: &[InsPolTable]) -> Vec<InsPolTable> {
        let spec = self.spec;
        let mut output = Vec::new();

        for (i, table) in tables.iter().enumerate() {
            let label = format!("OI_INSPOL #{} (ARRNAME='{}')", i + 1, table.arrname);
            if !spec.arrname.matches(&table.arrname) {
                debug!("{label} skipped: name not selected");
                continue;
            }

            let mut filtered = table.without_records();
            for record in &table.records {
                let Some(target_id) = self.targets.remap(record.target_id) else {
                    continue;
                };
                if !spec.mjd_range.overlaps(record.mjd_obs, record.mjd_end) {
                    continue;
                }
                let Some(mask) = self.masks.get(&record.insname) else {
                    continue;
                };
                if record.channel_lengths().iter().any(|&n| n != mask.keep.len()) {
                    warn!(
                        "{label}: record for INSNAME='{}' skipped: channel count mismatch",
                        record.insname
                    );
                    continue;
                }
                let mut record = record.clone();
                record.retain_channels(&mask.keep);
                record.target_id = target_id;
                filtered.records.push(record);
            }

            if filtered.is_empty() {
                warn!("{label} removed: no records accepted");
                continue;
            }
            output.push(filtered);
        }
        output
    }
}

/// Names referenced by measurement tables.
#[derive(Default)]
struct References {
    arrays: HashSet<String>,
    insnames: HashSet<String>,
    corrs: HashSet<String>,
}

impl References {
    fn collect<T: MeasurementTable>(&mut self, tables: &[T]) {
        for table in tables {
            self.insnames.insert(table.insname().to_string());
            if let Some(arrname) = table.arrname() {
                self.arrays.insert(arrname.to_string());
            }
            if let Some(corrname) = table.corrname() {
                self.corrs.insert(corrname.to_string());
            }
        }
    }
}

/// Remove lookup and polarisation tables that nothing references, until
/// nothing more can be removed.
fn prune_orphans(output: &mut Dataset) {
    loop {
        let mut refs = References::default();
        refs.collect(&output.vis);
        refs.collect(&output.vis2);
        refs.collect(&output.t3);
        refs.collect(&output.flux);

        let before = output.inspol.len();
        output
            .inspol
            .retain(|table| refs.arrays.contains(&table.arrname));
        let mut removed = before - output.inspol.len();

        for table in &output.inspol {
            refs.arrays.insert(table.arrname.clone());
            for record in &table.records {
                refs.insnames.insert(record.insname.clone());
            }
        }

        removed += output.retain_arrays(|t| refs.arrays.contains(&t.arrname));
        removed += output.retain_wavelengths(|t| refs.insnames.contains(&t.insname));
        removed += output.retain_corrs(|t| refs.corrs.contains(&t.corrname));

        if removed == 0 {
            break;
        }
        debug!("pruned {removed} unreferenced tables");
    }
}
