//! oifits: validation, filtering and merging of optical interferometry data.
//!
//! An OIFITS dataset is a graph of tables linked by name and id: targets,
//! arrays of stations, wavelength tables, correlation tables, and
//! measurement tables (OI_VIS, OI_VIS2, OI_T3, OI_FLUX, OI_INSPOL) whose
//! records hold one value per spectral channel.
//!
//! # Core Operations
//!
//! - **Check**: report conformity problems with a severity per rule
//! - **Filter**: keep a consistent subset, pruning tables nothing uses
//! - **Merge**: combine datasets, reconciling target and table identities
//!
//! # Example
//!
//! ```no_run
//! use oifits::{Bounds, ConformanceChecker, FilterSpec, filter, read_dataset};
//!
//! let dataset = read_dataset("night1.json").unwrap();
//! let report = ConformanceChecker::new().run(&dataset);
//! println!("{report}");
//!
//! let spec = FilterSpec::new().with_wavelength_range(Bounds::new(1.5e-6, 1.8e-6));
//! let h_band = filter(&dataset, &spec);
//! println!("{}", h_band.summary());
//! ```

pub mod check;
pub mod error;
pub mod filter;
pub mod lookup;
pub mod merge;
pub mod model;
pub mod persistence;
pub mod upgrade;

pub use check::{Check, CheckReport, CheckResult, ConformanceChecker, Severity};
pub use error::{OiError, Result};
pub use filter::{Bounds, FilterEngine, FilterSpec, GlobPattern, filter};
pub use lookup::{LookupIndex, MissingReference, ReferenceKind};
pub use merge::{MergeEngine, merge};
pub use model::Dataset;
pub use persistence::{read_dataset, write_dataset};
pub use upgrade::upgrade;
