//! Conformity checking of OIFITS datasets.

mod checks;
mod engine;
mod result;

pub use checks::{
    ChannelCounts, Check, CorrPresent, ElementsPresent, Flagging, T3AmpNormalization,
    TargetsPresent, UniqueTargetIds, UniqueTargets, WavelengthOrder,
};
pub use engine::{CheckReport, ConformanceChecker, NamedResult};
pub use result::{CheckResult, MAX_REPORTED, Severity, TRUNCATION_MARKER};
