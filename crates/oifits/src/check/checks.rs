//! Individual conformity checks.
//!
//! Each check tests one rule and never modifies the dataset. Flagged
//! channels are skipped by the per-channel checks; a record whose channels
//! are all flagged is therefore skipped channel by channel, not as a whole.

use std::collections::HashSet;

use crate::model::{ChannelRecord, Dataset, MeasurementTable};

use super::result::{CheckResult, Severity};

/// A single conformity check.
pub trait Check {
    /// Short identifier for reports.
    fn name(&self) -> &'static str;

    /// Run the check.
    fn check(&self, dataset: &Dataset) -> CheckResult;
}

/// Warns about target names that repeat an earlier target's name.
pub struct UniqueTargets;

impl Check for UniqueTargets {
    fn name(&self) -> &'static str {
        "unique_targets"
    }

    fn check(&self, dataset: &Dataset) -> CheckResult {
        const DESC: &str = "Duplicate value in TARGET column of OI_TARGET";
        let mut result = CheckResult::new();
        let mut seen = HashSet::new();

        for (i, target) in dataset.targets.targets.iter().enumerate() {
            if !seen.insert(target.target.as_str()) {
                result.record(
                    Severity::Warning,
                    DESC,
                    format!("OI_TARGET record {} (TARGET='{}')", i + 1, target.target),
                );
            }
        }

        result
    }
}

/// Warns about target ids that repeat an earlier target's id.
///
/// Lookups by id resolve to the first target, so later duplicates are
/// unreachable from measurement records.
pub struct UniqueTargetIds;

impl Check for UniqueTargetIds {
    fn name(&self) -> &'static str {
        "unique_target_ids"
    }

    fn check(&self, dataset: &Dataset) -> CheckResult {
        const DESC: &str = "Duplicate value in TARGET_ID column of OI_TARGET";
        let mut result = CheckResult::new();
        let mut seen = HashSet::new();

        for (i, target) in dataset.targets.targets.iter().enumerate() {
            if !seen.insert(target.target_id) {
                result.record(
                    Severity::Warning,
                    DESC,
                    format!("OI_TARGET record {} (TARGET_ID={})", i + 1, target.target_id),
                );
            }
        }

        result
    }
}

/// Requires every record's `target_id` to exist in OI_TARGET.
pub struct TargetsPresent;

impl TargetsPresent {
    const DESC: &'static str = "TARGET_ID not present in OI_TARGET";

    fn check_tables<T: MeasurementTable>(
        dataset: &Dataset,
        tables: &[T],
        result: &mut CheckResult,
    ) {
        for (i, table) in tables.iter().enumerate() {
            for (j, record) in table.records().iter().enumerate() {
                if dataset.lookup_target(record.target_id()).is_none() {
                    result.record(
                        Severity::NotConformant,
                        Self::DESC,
                        format!(
                            "{} #{} record {} (TARGET_ID={})",
                            T::KIND,
                            i + 1,
                            j + 1,
                            record.target_id()
                        ),
                    );
                }
            }
        }
    }
}

impl Check for TargetsPresent {
    fn name(&self) -> &'static str {
        "targets_present"
    }

    fn check(&self, dataset: &Dataset) -> CheckResult {
        let mut result = CheckResult::new();
        Self::check_tables(dataset, &dataset.vis, &mut result);
        Self::check_tables(dataset, &dataset.vis2, &mut result);
        Self::check_tables(dataset, &dataset.t3, &mut result);
        Self::check_tables(dataset, &dataset.flux, &mut result);

        for (i, table) in dataset.inspol.iter().enumerate() {
            for (j, record) in table.records.iter().enumerate() {
                if dataset.lookup_target(record.target_id).is_none() {
                    result.record(
                        Severity::NotConformant,
                        Self::DESC,
                        format!(
                            "OI_INSPOL #{} record {} (TARGET_ID={})",
                            i + 1,
                            j + 1,
                            record.target_id
                        ),
                    );
                }
            }
        }

        result
    }
}

/// Requires every station index to exist in the referenced OI_ARRAY.
///
/// Tables without an array reference are skipped. A reference to an array
/// that is missing altogether makes every station index unresolvable.
pub struct ElementsPresent;

impl ElementsPresent {
    const DESC: &'static str = "STA_INDEX not present in referenced OI_ARRAY";

    fn check_tables<T: MeasurementTable>(
        dataset: &Dataset,
        tables: &[T],
        result: &mut CheckResult,
    ) {
        for (i, table) in tables.iter().enumerate() {
            let Some(arrname) = table.arrname().filter(|name| !name.is_empty()) else {
                continue;
            };
            for (j, record) in table.records().iter().enumerate() {
                for &sta_index in record.station_indices() {
                    if dataset.lookup_element(arrname, sta_index).is_none() {
                        result.record(
                            Severity::NotConformant,
                            Self::DESC,
                            format!(
                                "{} #{} record {} (STA_INDEX={sta_index}, ARRNAME='{arrname}')",
                                T::KIND,
                                i + 1,
                                j + 1
                            ),
                        );
                    }
                }
            }
        }
    }
}

impl Check for ElementsPresent {
    fn name(&self) -> &'static str {
        "elements_present"
    }

    fn check(&self, dataset: &Dataset) -> CheckResult {
        let mut result = CheckResult::new();
        Self::check_tables(dataset, &dataset.vis, &mut result);
        Self::check_tables(dataset, &dataset.vis2, &mut result);
        Self::check_tables(dataset, &dataset.t3, &mut result);
        Self::check_tables(dataset, &dataset.flux, &mut result);

        for (i, table) in dataset.inspol.iter().enumerate() {
            if table.arrname.is_empty() {
                continue;
            }
            for (j, record) in table.records.iter().enumerate() {
                if dataset
                    .lookup_element(&table.arrname, record.sta_index)
                    .is_none()
                {
                    result.record(
                        Severity::NotConformant,
                        Self::DESC,
                        format!(
                            "OI_INSPOL #{} record {} (STA_INDEX={}, ARRNAME='{}')",
                            i + 1,
                            j + 1,
                            record.sta_index,
                            table.arrname
                        ),
                    );
                }
            }
        }

        result
    }
}

/// Requires every `corrname` reference to match an OI_CORR table.
pub struct CorrPresent;

impl CorrPresent {
    const DESC: &'static str = "CORRNAME not matched by an OI_CORR table";

    fn check_tables<T: MeasurementTable>(
        dataset: &Dataset,
        tables: &[T],
        result: &mut CheckResult,
    ) {
        for (i, table) in tables.iter().enumerate() {
            if let Some(corrname) = table.corrname().filter(|name| !name.is_empty()) {
                if dataset.lookup_corr(corrname).is_none() {
                    result.record(
                        Severity::NotConformant,
                        Self::DESC,
                        format!("{} #{} (CORRNAME='{corrname}')", T::KIND, i + 1),
                    );
                }
            }
        }
    }
}

impl Check for CorrPresent {
    fn name(&self) -> &'static str {
        "corr_present"
    }

    fn check(&self, dataset: &Dataset) -> CheckResult {
        let mut result = CheckResult::new();
        Self::check_tables(dataset, &dataset.vis, &mut result);
        Self::check_tables(dataset, &dataset.vis2, &mut result);
        Self::check_tables(dataset, &dataset.t3, &mut result);
        Self::check_tables(dataset, &dataset.flux, &mut result);
        result
    }
}

/// Requires non-negative error bars on unflagged channels.
pub struct Flagging;

impl Flagging {
    fn check_tables<T: MeasurementTable>(tables: &[T], result: &mut CheckResult) {
        for (i, table) in tables.iter().enumerate() {
            for (j, record) in table.records().iter().enumerate() {
                let errors = record.error_bars();
                for (k, &flagged) in record.flags().iter().enumerate() {
                    if flagged {
                        continue;
                    }
                    let negative = errors
                        .iter()
                        .any(|errs| errs.get(k).is_some_and(|&e| e < 0.0));
                    if negative {
                        result.record(
                            Severity::NotConformant,
                            "Negative error bar on unflagged data",
                            format!("{} #{} record {} channel {}", T::KIND, i + 1, j + 1, k + 1),
                        );
                    }
                }
            }
        }
    }
}

impl Check for Flagging {
    fn name(&self) -> &'static str {
        "flagging"
    }

    fn check(&self, dataset: &Dataset) -> CheckResult {
        let mut result = CheckResult::new();
        Self::check_tables(&dataset.vis, &mut result);
        Self::check_tables(&dataset.vis2, &mut result);
        Self::check_tables(&dataset.t3, &mut result);
        Self::check_tables(&dataset.flux, &mut result);
        result
    }
}

/// Flags unflagged T3 amplitudes more than one error bar above unity.
pub struct T3AmpNormalization;

impl Check for T3AmpNormalization {
    fn name(&self) -> &'static str {
        "t3amp"
    }

    fn check(&self, dataset: &Dataset) -> CheckResult {
        let mut result = CheckResult::new();

        for (i, table) in dataset.t3.iter().enumerate() {
            for (j, record) in table.records.iter().enumerate() {
                let channels = record
                    .flag
                    .iter()
                    .zip(&record.t3amp)
                    .zip(&record.t3amperr)
                    .enumerate();
                for (k, ((&flagged, &amp), &err)) in channels {
                    // NaN amplitudes compare false and are never reported.
                    if !flagged && amp - err > 1.0 {
                        result.record(
                            Severity::NotConformant,
                            "High T3AMP value suggests data not normalised",
                            format!("OI_T3 #{} record {} channel {}", i + 1, j + 1, k + 1),
                        );
                    }
                }
            }
        }

        result
    }
}

/// Warns when wavelengths within an OI_WAVELENGTH table are not monotonic.
pub struct WavelengthOrder;

impl Check for WavelengthOrder {
    fn name(&self) -> &'static str {
        "wavelength_order"
    }

    fn check(&self, dataset: &Dataset) -> CheckResult {
        let mut result = CheckResult::new();

        for table in dataset.wavelengths() {
            let waves: Vec<f64> = table.eff_waves().collect();
            for (k, w) in waves.windows(3).enumerate() {
                let (prev, this, next) = (w[0], w[1], w[2]);
                let peak = this > prev && this > next;
                let trough = this < prev && this < next;
                if peak || trough {
                    result.record(
                        Severity::Warning,
                        "Wavelengths not sorted",
                        format!("OI_WAVELENGTH INSNAME='{}' channel {}", table.insname, k + 2),
                    );
                }
            }
        }

        result
    }
}

/// Requires per-channel vectors to match the referenced wavelength table.
///
/// Tables whose wavelength table is missing are not checked here.
pub struct ChannelCounts;

impl ChannelCounts {
    const DESC: &'static str = "Channel count does not match referenced OI_WAVELENGTH";

    fn check_tables<T: MeasurementTable>(
        dataset: &Dataset,
        tables: &[T],
        result: &mut CheckResult,
    ) {
        for (i, table) in tables.iter().enumerate() {
            let Some(wavelength) = dataset.lookup_wavelength(table.insname()) else {
                continue;
            };
            let nwave = wavelength.nwave();
            if table.nwave() != nwave {
                result.record(
                    Severity::NotPhysicalFormat,
                    Self::DESC,
                    format!(
                        "{} #{} (NWAVE={}, INSNAME='{}' has {nwave})",
                        T::KIND,
                        i + 1,
                        table.nwave(),
                        table.insname()
                    ),
                );
            }
            for (j, record) in table.records().iter().enumerate() {
                if let Some(&found) = record.channel_lengths().iter().find(|&&n| n != nwave) {
                    result.record(
                        Severity::NotPhysicalFormat,
                        Self::DESC,
                        format!(
                            "{} #{} record {} ({found} channels, expected {nwave})",
                            T::KIND,
                            i + 1,
                            j + 1
                        ),
                    );
                }
            }
        }
    }
}

impl Check for ChannelCounts {
    fn name(&self) -> &'static str {
        "channel_counts"
    }

    fn check(&self, dataset: &Dataset) -> CheckResult {
        let mut result = CheckResult::new();
        Self::check_tables(dataset, &dataset.vis, &mut result);
        Self::check_tables(dataset, &dataset.vis2, &mut result);
        Self::check_tables(dataset, &dataset.t3, &mut result);
        Self::check_tables(dataset, &dataset.flux, &mut result);

        for (i, table) in dataset.inspol.iter().enumerate() {
            for (j, record) in table.records.iter().enumerate() {
                let Some(wavelength) = dataset.lookup_wavelength(&record.insname) else {
                    continue;
                };
                let nwave = wavelength.nwave();
                if let Some(&found) = record.channel_lengths().iter().find(|&&n| n != nwave) {
                    result.record(
                        Severity::NotPhysicalFormat,
                        Self::DESC,
                        format!(
                            "OI_INSPOL #{} record {} ({found} channels, expected {nwave})",
                            i + 1,
                            j + 1
                        ),
                    );
                }
            }
        }

        result
    }
}
