//! Dataset filtering.
//!
//! A [`FilterSpec`] selects tables by name pattern, records by target, epoch
//! and baseline, and channels by wavelength. Channels whose UV radius or SNR
//! fall out of range are flagged rather than removed. The [`FilterEngine`]
//! then prunes lookup tables that nothing references any more.

mod engine;
mod glob;
mod spec;

pub use engine::{FilterEngine, filter};
pub use glob::GlobPattern;
pub use spec::{Bounds, FilterSpec};
