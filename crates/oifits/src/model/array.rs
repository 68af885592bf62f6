//! Array tables (OI_ARRAY).

use serde::{Deserialize, Serialize};

/// One telescope/station element of an array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(default)]
    pub tel_name: String,
    #[serde(default)]
    pub sta_name: String,
    /// Station index, unique within its array table.
    pub sta_index: i32,
    /// Element diameter \[m\].
    #[serde(default)]
    pub diameter: f64,
    /// Station coordinates relative to the array centre \[m\].
    #[serde(default)]
    pub staxyz: [f64; 3],
    /// Photometric field of view \[arcsec\] (OIFITS2 only).
    #[serde(default)]
    pub fov: f64,
    #[serde(default)]
    pub fovtype: String,
}

impl Element {
    pub fn new(sta_index: i32, sta_name: impl Into<String>) -> Self {
        Self {
            sta_index,
            sta_name: sta_name.into(),
            ..Self::default()
        }
    }
}

/// An OI_ARRAY table, identified by `arrname`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayTable {
    pub revision: i32,
    pub arrname: String,
    /// Coordinate frame, normally "GEOCENTRIC".
    #[serde(default)]
    pub frame: String,
    /// Array centre \[m\].
    #[serde(default)]
    pub arrayxyz: [f64; 3],
    pub elements: Vec<Element>,
}

impl ArrayTable {
    /// Create an empty array table.
    pub fn new(arrname: impl Into<String>) -> Self {
        Self {
            revision: super::OIFITS2_REVISION,
            arrname: arrname.into(),
            frame: "GEOCENTRIC".to_string(),
            arrayxyz: [0.0; 3],
            elements: Vec::new(),
        }
    }

    /// Add elements.
    pub fn with_elements(mut self, elements: impl IntoIterator<Item = Element>) -> Self {
        self.elements.extend(elements);
        self
    }

    /// Find the element with the given station index.
    pub fn element(&self, sta_index: i32) -> Option<&Element> {
        self.elements.iter().find(|e| e.sta_index == sta_index)
    }
}
