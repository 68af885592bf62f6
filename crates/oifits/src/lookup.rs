//! Name-keyed lookup of the tables owned by a [`Dataset`](crate::Dataset).
//!
//! The index stores positions into the dataset's own table vectors. It is
//! extended when a table is appended and rebuilt when one is removed, so it
//! always describes exactly the tables its dataset owns.

use std::fmt;

use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::model::{ArrayTable, CorrTable, TableKind, WavelengthTable};

/// Positions of name-keyed tables within their owning vectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupIndex {
    arrays: IndexMap<String, usize>,
    wavelengths: IndexMap<String, usize>,
    corrs: IndexMap<String, usize>,
}

impl LookupIndex {
    /// Build an index over the given tables.
    ///
    /// If a name repeats, the first table keeps the key and a warning is
    /// logged for the later ones.
    pub fn build(
        arrays: &[ArrayTable],
        wavelengths: &[WavelengthTable],
        corrs: &[CorrTable],
    ) -> Self {
        Self {
            arrays: index_names("OI_ARRAY", arrays.iter().map(|t| t.arrname.as_str())),
            wavelengths: index_names(
                "OI_WAVELENGTH",
                wavelengths.iter().map(|t| t.insname.as_str()),
            ),
            corrs: index_names("OI_CORR", corrs.iter().map(|t| t.corrname.as_str())),
        }
    }

    /// Index a newly appended array table. Returns false if the name is
    /// already taken.
    pub(crate) fn insert_array(&mut self, arrname: &str, pos: usize) -> bool {
        insert_name(&mut self.arrays, "OI_ARRAY", arrname, pos)
    }

    pub(crate) fn insert_wavelength(&mut self, insname: &str, pos: usize) -> bool {
        insert_name(&mut self.wavelengths, "OI_WAVELENGTH", insname, pos)
    }

    pub(crate) fn insert_corr(&mut self, corrname: &str, pos: usize) -> bool {
        insert_name(&mut self.corrs, "OI_CORR", corrname, pos)
    }

    /// Position of the array table named `arrname`.
    pub fn array(&self, arrname: &str) -> Option<usize> {
        self.arrays.get(arrname).copied()
    }

    /// Position of the wavelength table named `insname`.
    pub fn wavelength(&self, insname: &str) -> Option<usize> {
        self.wavelengths.get(insname).copied()
    }

    /// Position of the correlation table named `corrname`.
    pub fn corr(&self, corrname: &str) -> Option<usize> {
        self.corrs.get(corrname).copied()
    }

    /// Indexed array names, in table order.
    pub fn array_names(&self) -> impl Iterator<Item = &str> {
        self.arrays.keys().map(String::as_str)
    }

    /// Indexed instrument names, in table order.
    pub fn wavelength_names(&self) -> impl Iterator<Item = &str> {
        self.wavelengths.keys().map(String::as_str)
    }

    /// Indexed correlation names, in table order.
    pub fn corr_names(&self) -> impl Iterator<Item = &str> {
        self.corrs.keys().map(String::as_str)
    }
}

fn index_names<'a>(
    extname: &str,
    names: impl Iterator<Item = &'a str>,
) -> IndexMap<String, usize> {
    let mut map = IndexMap::new();
    for (pos, name) in names.enumerate() {
        insert_name(&mut map, extname, name, pos);
    }
    map
}

fn insert_name(map: &mut IndexMap<String, usize>, extname: &str, name: &str, pos: usize) -> bool {
    if map.contains_key(name) {
        warn!("{extname} name '{name}' is not unique; table {} ignored by lookup", pos + 1);
        false
    } else {
        map.insert(name.to_string(), pos);
        true
    }
}

/// Which kind of lookup table a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Array,
    Wavelength,
    Corr,
}

impl ReferenceKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            ReferenceKind::Array => "ARRNAME",
            ReferenceKind::Wavelength => "INSNAME",
            ReferenceKind::Corr => "CORRNAME",
        }
    }
}

/// A measurement table naming a lookup table that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingReference {
    /// Kind of the referencing table.
    pub table: TableKind,
    /// 1-based position among tables of that kind.
    pub position: usize,
    /// What is referenced.
    pub reference: ReferenceKind,
    /// The unresolved name.
    pub name: String,
}

impl fmt::Display for MissingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} {}='{}' not found",
            self.table,
            self.position,
            self.reference.keyword(),
            self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_duplicate_wins() {
        let arrays = vec![ArrayTable::new("A"), ArrayTable::new("B"), ArrayTable::new("A")];
        let index = LookupIndex::build(&arrays, &[], &[]);

        assert_eq!(index.array("A"), Some(0));
        assert_eq!(index.array("B"), Some(1));
        assert_eq!(index.array("C"), None);
        assert_eq!(index.array_names().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_missing_reference_display() {
        let missing = MissingReference {
            table: TableKind::T3,
            position: 2,
            reference: ReferenceKind::Wavelength,
            name: "GRAVITY_SC".to_string(),
        };
        assert_eq!(missing.to_string(), "OI_T3 #2 INSNAME='GRAVITY_SC' not found");
    }
}
