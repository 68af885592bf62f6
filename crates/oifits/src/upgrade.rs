//! In-place conversion of OIFITS version 1 content to version 2.

use chrono::{Days, NaiveDate};
use log::debug;

use crate::model::{ChannelRecord, Dataset, MULTIPLE_VALUES, MeasurementTable, OIFITS2_REVISION};

/// Value of the CONTENT header keyword for version 2 files.
pub const CONTENT_OIFITS2: &str = "OIFITS2";

/// Convert an MJD to its calendar date.
pub fn mjd_to_date(mjd: f64) -> Option<NaiveDate> {
    if !mjd.is_finite() || mjd < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1858, 11, 17)?;
    epoch.checked_add_days(Days::new(mjd.floor() as u64))
}

/// Upgrade `dataset` to OIFITS version 2.
///
/// Tables that already existed in version 1 get revision 2, the CONTENT
/// keyword is set, and missing DATE-OBS and OBJECT header values are filled
/// from the data. Tables introduced by version 2 keep their revision.
pub fn upgrade(dataset: &mut Dataset) {
    dataset.targets.revision = OIFITS2_REVISION;
    let (arrays, wavelengths, _) = dataset.lookup_tables_mut();
    for table in arrays {
        table.revision = OIFITS2_REVISION;
    }
    for table in wavelengths {
        table.revision = OIFITS2_REVISION;
    }
    for table in &mut dataset.vis {
        table.revision = OIFITS2_REVISION;
    }
    for table in &mut dataset.vis2 {
        table.revision = OIFITS2_REVISION;
    }
    for table in &mut dataset.t3 {
        table.revision = OIFITS2_REVISION;
    }

    let first_date = earliest_mjd(dataset).and_then(mjd_to_date);
    let header = &mut dataset.header;
    header.content = CONTENT_OIFITS2.to_string();

    if header.date_obs.is_none() {
        header.date_obs = first_date;
        if let Some(date) = first_date {
            debug!("DATE-OBS set to {date}");
        }
    }

    if header.object.is_empty() {
        header.object = match dataset.targets.targets.as_slice() {
            [] => String::new(),
            [target] => target.target.clone(),
            _ => MULTIPLE_VALUES.to_string(),
        };
    }
}

fn earliest_mjd(dataset: &Dataset) -> Option<f64> {
    fn table_mjds<T: MeasurementTable>(tables: &[T]) -> impl Iterator<Item = f64> + '_ {
        tables
            .iter()
            .flat_map(|t| t.records().iter().map(|r| r.mjd()))
    }

    table_mjds(&dataset.vis)
        .chain(table_mjds(&dataset.vis2))
        .chain(table_mjds(&dataset.t3))
        .chain(table_mjds(&dataset.flux))
        .filter(|mjd| mjd.is_finite())
        .min_by(f64::total_cmp)
}
