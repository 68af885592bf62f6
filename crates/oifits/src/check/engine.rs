//! Running a set of checks over one dataset.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Dataset;

use super::checks::{
    ChannelCounts, Check, CorrPresent, ElementsPresent, Flagging, T3AmpNormalization,
    TargetsPresent, UniqueTargetIds, UniqueTargets, WavelengthOrder,
};
use super::result::{CheckResult, Severity};

/// A check result labelled with the check that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResult {
    pub check: String,
    pub result: CheckResult,
}

/// Results of every check run against a dataset, in run order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub results: Vec<NamedResult>,
}

impl CheckReport {
    /// The most severe level across all checks.
    pub fn worst_level(&self) -> Severity {
        self.results
            .iter()
            .map(|r| r.result.level)
            .max()
            .unwrap_or_default()
    }

    /// Results that recorded at least one violation.
    pub fn failures(&self) -> impl Iterator<Item = &NamedResult> {
        self.results.iter().filter(|r| !r.result.passed())
    }

    /// Result of the check named `check`, if it was run.
    pub fn get(&self, check: &str) -> Option<&CheckResult> {
        self.results
            .iter()
            .find(|r| r.check == check)
            .map(|r| &r.result)
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in self.failures() {
            writeln!(f, "[{}] {}", failure.check, failure.result)?;
        }
        write!(f, "Overall: {}", self.worst_level())
    }
}

/// Runs a configurable list of checks.
pub struct ConformanceChecker {
    checks: Vec<Box<dyn Check>>,
}

impl ConformanceChecker {
    /// Create a checker with every standard check.
    pub fn new() -> Self {
        Self {
            checks: vec![
                Box::new(UniqueTargets),
                Box::new(UniqueTargetIds),
                Box::new(TargetsPresent),
                Box::new(ElementsPresent),
                Box::new(CorrPresent),
                Box::new(Flagging),
                Box::new(T3AmpNormalization),
                Box::new(WavelengthOrder),
                Box::new(ChannelCounts),
            ],
        }
    }

    /// Create a checker with no checks, to be filled with [`Self::with_check`].
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a check.
    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Names of the configured checks, in run order.
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run every configured check.
    pub fn run(&self, dataset: &Dataset) -> CheckReport {
        CheckReport {
            results: self
                .checks
                .iter()
                .map(|check| NamedResult {
                    check: check.name().to_string(),
                    result: check.check(dataset),
                })
                .collect(),
        }
    }
}

impl Default for ConformanceChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Target;

    #[test]
    fn test_empty_dataset_passes() {
        let report = ConformanceChecker::new().run(&Dataset::new());
        assert_eq!(report.results.len(), 9);
        assert_eq!(report.worst_level(), Severity::None);
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn test_selected_checks_only() {
        let mut dataset = Dataset::new();
        dataset.targets.push(Target::new(1, "Vega"));
        dataset.targets.push(Target::new(2, "Vega"));

        let checker = ConformanceChecker::empty().with_check(UniqueTargets);
        assert_eq!(checker.check_names(), vec!["unique_targets"]);

        let report = checker.run(&dataset);
        assert_eq!(report.worst_level(), Severity::Warning);
        assert_eq!(report.get("unique_targets").unwrap().num_failed, 1);
        assert!(report.get("flagging").is_none());
        assert!(report.to_string().contains("Overall: Warning"));
    }

    #[test]
    fn test_duplicate_target_ids_reported() {
        let mut dataset = Dataset::new();
        dataset.targets.push(Target::new(1, "Alpha"));
        dataset.targets.push(Target::new(1, "Beta"));

        let report = ConformanceChecker::new().run(&dataset);
        assert_eq!(report.worst_level(), Severity::Warning);
        assert_eq!(report.get("unique_target_ids").unwrap().num_failed, 1);
        assert!(report.get("unique_targets").unwrap().passed());
    }
}
