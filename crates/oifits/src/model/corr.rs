//! Correlation tables (OI_CORR).

use serde::{Deserialize, Serialize};

/// One non-zero element of a sparse correlation matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrEntry {
    /// First index (1-based).
    pub iindx: i32,
    /// Second index (1-based).
    pub jindx: i32,
    pub corr: f64,
}

/// An OI_CORR table, identified by `corrname`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrTable {
    pub revision: i32,
    pub corrname: String,
    /// Dimension of the full correlation matrix.
    pub ndata: usize,
    pub entries: Vec<CorrEntry>,
}

impl CorrTable {
    /// Create an empty correlation table.
    pub fn new(corrname: impl Into<String>, ndata: usize) -> Self {
        Self {
            revision: 1,
            corrname: corrname.into(),
            ndata,
            entries: Vec::new(),
        }
    }

    /// Whether two tables describe the same matrix, ignoring names.
    pub fn is_equivalent(&self, other: &CorrTable, tolerance: f64) -> bool {
        self.ndata == other.ndata
            && self.entries.len() == other.entries.len()
            && self.entries.iter().zip(&other.entries).all(|(a, b)| {
                a.iindx == b.iindx && a.jindx == b.jindx && (a.corr - b.corr).abs() <= tolerance
            })
    }
}
