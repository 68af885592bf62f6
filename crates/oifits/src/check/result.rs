//! Severity levels and per-check results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of locations listed in a [`CheckResult`].
pub const MAX_REPORTED: usize = 10;

/// Placed in the last location slot once more than [`MAX_REPORTED`]
/// occurrences have been seen.
pub const TRUNCATION_MARKER: &str = "[List truncated]";

/// How serious a conformity violation is.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// No problem found.
    #[default]
    None,
    /// Legal but questionable.
    Warning,
    /// Violates the OIFITS standard.
    NotConformant,
    /// Cannot be represented in a valid OIFITS file at all.
    NotPhysicalFormat,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::None => "OK",
            Severity::Warning => "Warning",
            Severity::NotConformant => "Not OIFITS conformant",
            Severity::NotPhysicalFormat => "Not a valid OIFITS file",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of running one check over a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Worst severity seen.
    pub level: Severity,
    /// Description of the rule violated; empty when nothing failed.
    pub description: String,
    /// Total number of occurrences, including unlisted ones.
    pub num_failed: usize,
    /// Where the first occurrences were found.
    pub locations: Vec<String>,
}

impl CheckResult {
    /// Create a passing result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of a violation.
    ///
    /// The level becomes the maximum seen, and the description is set by the
    /// first occurrence only.
    pub fn record(&mut self, level: Severity, description: &str, location: impl Into<String>) {
        if self.num_failed == 0 {
            self.description = description.to_string();
        }
        self.level = self.level.max(level);

        if self.num_failed < MAX_REPORTED {
            self.locations.push(location.into());
        } else if self.num_failed == MAX_REPORTED {
            if let Some(last) = self.locations.last_mut() {
                *last = TRUNCATION_MARKER.to_string();
            }
        }
        self.num_failed += 1;
    }

    /// True if nothing failed.
    pub fn passed(&self) -> bool {
        self.num_failed == 0
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return f.write_str(self.level.label());
        }
        writeln!(f, "*** {}: {}", self.level, self.description)?;
        write!(f, "    {} occurrences:", self.num_failed)?;
        for location in &self.locations {
            write!(f, "\n    {location}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::None < Severity::Warning);
        assert!(Severity::Warning < Severity::NotConformant);
        assert!(Severity::NotConformant < Severity::NotPhysicalFormat);
    }

    #[test]
    fn test_first_description_and_max_level() {
        let mut result = CheckResult::new();
        result.record(Severity::Warning, "first", "a");
        result.record(Severity::NotConformant, "second", "b");
        result.record(Severity::Warning, "third", "c");

        assert_eq!(result.level, Severity::NotConformant);
        assert_eq!(result.description, "first");
        assert_eq!(result.num_failed, 3);
        assert_eq!(result.locations, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_exactly_max_reported_is_not_truncated() {
        let mut result = CheckResult::new();
        for i in 0..MAX_REPORTED {
            result.record(Severity::Warning, "x", format!("loc {i}"));
        }
        assert_eq!(result.locations.len(), MAX_REPORTED);
        assert_eq!(result.locations.last().unwrap(), "loc 9");
    }

    #[test]
    fn test_truncation_marker() {
        let mut result = CheckResult::new();
        for i in 0..25 {
            result.record(Severity::Warning, "x", format!("loc {i}"));
        }
        assert_eq!(result.num_failed, 25);
        assert_eq!(result.locations.len(), MAX_REPORTED);
        assert_eq!(result.locations[MAX_REPORTED - 2], "loc 8");
        assert_eq!(result.locations[MAX_REPORTED - 1], TRUNCATION_MARKER);
    }

    #[test]
    fn test_passing_result() {
        let result = CheckResult::new();
        assert!(result.passed());
        assert_eq!(result.level, Severity::None);
        assert_eq!(result.to_string(), "OK");
    }
}
