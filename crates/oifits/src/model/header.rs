//! Primary header metadata.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value used for header fields that disagree between merged inputs.
pub const MULTIPLE_VALUES: &str = "MULTI";

/// Scalar metadata from the primary header of an OIFITS file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Institution responsible for creating the file.
    #[serde(default)]
    pub origin: String,
    /// Date the file was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Start date of the observation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_obs: Option<NaiveDate>,
    /// Format revision marker, e.g. "OIFITS2".
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub telescop: String,
    #[serde(default)]
    pub instrume: String,
    #[serde(default)]
    pub observer: String,
    #[serde(default)]
    pub insmode: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub referenc: String,
    #[serde(default)]
    pub prog_id: String,
    #[serde(default)]
    pub procsoft: String,
    #[serde(default)]
    pub obstech: String,
}

impl Header {
    /// Create an empty header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the object name.
    pub fn with_object(mut self, object: impl Into<String>) -> Self {
        self.object = object.into();
        self
    }

    /// Set the telescope name.
    pub fn with_telescop(mut self, telescop: impl Into<String>) -> Self {
        self.telescop = telescop.into();
        self
    }

    /// Set the instrument name.
    pub fn with_instrume(mut self, instrume: impl Into<String>) -> Self {
        self.instrume = instrume.into();
        self
    }

    /// Set the observation date.
    pub fn with_date_obs(mut self, date_obs: NaiveDate) -> Self {
        self.date_obs = Some(date_obs);
        self
    }

    /// Combine the headers of several datasets.
    ///
    /// Descriptive fields that agree across all inputs are kept; fields that
    /// differ become [`MULTIPLE_VALUES`]. `date_obs` is the earliest date seen
    /// and `origin`/`content` come from the first header.
    pub fn merged<'a>(headers: impl IntoIterator<Item = &'a Header>) -> Header {
        let mut iter = headers.into_iter();
        let Some(first) = iter.next() else {
            return Header::default();
        };
        let mut out = first.clone();
        out.date = None;

        for other in iter {
            merge_field(&mut out.telescop, &other.telescop);
            merge_field(&mut out.instrume, &other.instrume);
            merge_field(&mut out.observer, &other.observer);
            merge_field(&mut out.insmode, &other.insmode);
            merge_field(&mut out.object, &other.object);
            merge_field(&mut out.referenc, &other.referenc);
            merge_field(&mut out.prog_id, &other.prog_id);
            merge_field(&mut out.procsoft, &other.procsoft);
            merge_field(&mut out.obstech, &other.obstech);
            out.date_obs = match (out.date_obs, other.date_obs) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
        }

        out
    }
}

fn merge_field(current: &mut String, other: &str) {
    if current != other {
        *current = MULTIPLE_VALUES.to_string();
    }
}
