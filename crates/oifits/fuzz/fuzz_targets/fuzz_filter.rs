//! Fuzz target for the filter engine.
//!
//! This fuzzer builds a small dataset and a `FilterSpec` from
//! arbitrary input and tests that the output never references a missing
//! lookup table.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use oifits::model::{ArrayTable, Element, Target, Vis2Record, Vis2Table, WavelengthTable};
use oifits::{Bounds, Dataset, FilterSpec, filter};

#[derive(Debug, Arbitrary)]
struct Record {
    target_id: i8,
    mjd: f64,
    u: f64,
    v: f64,
    station: u8,
    values: Vec<(f64, f64, bool)>,
}

#[derive(Debug, Arbitrary)]
struct Input {
    targets: Vec<(i8, String)>,
    waves: Vec<f64>,
    records: Vec<Record>,
    target_id: Option<i8>,
    ranges: [(Option<f64>, Option<f64>); 5],
    toggles: [bool; 3],
}

fn bounds((min, max): (Option<f64>, Option<f64>)) -> Bounds {
    Bounds { min, max }
}

fuzz_target!(|input: Input| {
    let nwave = input.waves.len().clamp(1, 16);
    let waves: Vec<f64> = input
        .waves
        .iter()
        .copied()
        .chain(std::iter::repeat(2e-6))
        .take(nwave)
        .collect();

    let mut dataset = Dataset::new();
    for (id, name) in input.targets.iter().take(8) {
        dataset.targets.push(Target::new(i32::from(*id), name.as_str()));
    }
    dataset.add_array(
        ArrayTable::new("ARRAY").with_elements((1..=4).map(|i| Element::new(i, format!("T{i}")))),
    );
    dataset.add_wavelength(WavelengthTable::with_channels(
        "INS",
        waves.iter().map(|&w| (w, 1e-8)),
    ));

    let mut table = Vis2Table::new("INS", nwave).with_arrname("ARRAY");
    for record in input.records.iter().take(32) {
        let values: Vec<(f64, f64, bool)> = record
            .values
            .iter()
            .copied()
            .chain(std::iter::repeat((0.5, 0.1, false)))
            .take(nwave)
            .collect();
        let station = i32::from(record.station % 3) + 1;
        let vis2 = Vis2Record {
            target_id: i32::from(record.target_id),
            mjd: record.mjd,
            vis2data: values.iter().map(|v| v.0).collect(),
            vis2err: values.iter().map(|v| v.1).collect(),
            ucoord: record.u,
            vcoord: record.v,
            sta_index: [station, station + 1],
            flag: values.iter().map(|v| v.2).collect(),
            ..Default::default()
        };
        if table.push(vis2).is_err() {
            return;
        }
    }
    dataset.vis2.push(table);

    let mut spec = FilterSpec::new();
    spec.target_id = input.target_id.map(i32::from);
    spec.mjd_range = bounds(input.ranges[0]);
    spec.wavelength_range = bounds(input.ranges[1]);
    spec.baseline_range = bounds(input.ranges[2]);
    spec.uv_radius_range = bounds(input.ranges[3]);
    spec.snr_range = bounds(input.ranges[4]);
    spec.accept_vis2 = input.toggles[0];
    spec.accept_inspol = input.toggles[1];
    spec.accept_flagged = input.toggles[2];

    let output = filter(&dataset, &spec);
    assert!(output.missing_references().is_empty());
    for table in &output.vis2 {
        assert!(table.records.iter().all(|r| r.flag.len() == table.nwave));
    }
});
