//! Shared dataset builders for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use oifits::Dataset;
use oifits::model::{
    ArrayTable, CorrTable, Element, FluxRecord, FluxTable, Header, MeasurementTable, T3Record,
    T3Table, Target, Vis2Record, Vis2Table, VisRecord, VisTable, WavelengthTable,
};

/// GRAVITY science channel wavelengths \[m\].
pub const SC_WAVES: [f64; 5] = [2.0e-6, 2.1e-6, 2.2e-6, 2.3e-6, 2.4e-6];

/// GRAVITY fringe tracker wavelengths \[m\].
pub const FT_WAVES: [f64; 3] = [2.0e-6, 2.2e-6, 2.4e-6];

pub const BASELINES: [[i32; 2]; 6] = [[1, 2], [1, 3], [1, 4], [2, 3], [2, 4], [3, 4]];

pub const TRIANGLES: [[i32; 3]; 4] = [[1, 2, 3], [1, 2, 4], [1, 3, 4], [2, 3, 4]];

/// Ground positions of stations 1 to 4 \[m\].
const STATIONS: [(f64, f64); 4] = [(0.0, 0.0), (32.0, 0.0), (0.0, 48.0), (64.0, 96.0)];

/// Baseline vector from station `a` to station `b`.
pub fn uv(a: i32, b: i32) -> (f64, f64) {
    let (xa, ya) = STATIONS[(a - 1) as usize];
    let (xb, yb) = STATIONS[(b - 1) as usize];
    (xb - xa, yb - ya)
}

/// Observation epoch used for a target's records.
pub fn mjd_for(target_id: i32) -> f64 {
    59000.0 + 0.1 * target_id as f64
}

pub fn vis_record(target_id: i32, sta: [i32; 2], nwave: usize) -> VisRecord {
    let (u, v) = uv(sta[0], sta[1]);
    VisRecord {
        target_id,
        mjd: mjd_for(target_id),
        int_time: 10.0,
        visamp: vec![0.7; nwave],
        visamperr: vec![0.05; nwave],
        visphi: vec![5.0; nwave],
        visphierr: vec![1.0; nwave],
        ucoord: u,
        vcoord: v,
        sta_index: sta,
        flag: vec![false; nwave],
        ..Default::default()
    }
}

pub fn vis2_record(target_id: i32, sta: [i32; 2], nwave: usize) -> Vis2Record {
    let (u, v) = uv(sta[0], sta[1]);
    Vis2Record {
        target_id,
        mjd: mjd_for(target_id),
        int_time: 10.0,
        vis2data: (0..nwave).map(|k| 0.5 + 0.01 * k as f64).collect(),
        vis2err: vec![0.02; nwave],
        ucoord: u,
        vcoord: v,
        sta_index: sta,
        flag: vec![false; nwave],
        ..Default::default()
    }
}

pub fn t3_record(target_id: i32, sta: [i32; 3], nwave: usize) -> T3Record {
    let (u1, v1) = uv(sta[0], sta[1]);
    let (u2, v2) = uv(sta[1], sta[2]);
    T3Record {
        target_id,
        mjd: mjd_for(target_id),
        int_time: 10.0,
        t3amp: vec![0.8; nwave],
        t3amperr: vec![0.05; nwave],
        t3phi: vec![10.0; nwave],
        t3phierr: vec![2.0; nwave],
        u1coord: u1,
        v1coord: v1,
        u2coord: u2,
        v2coord: v2,
        sta_index: sta,
        flag: vec![false; nwave],
        ..Default::default()
    }
}

pub fn flux_record(target_id: i32, sta_index: i32, nwave: usize) -> FluxRecord {
    FluxRecord {
        target_id,
        mjd: mjd_for(target_id),
        int_time: 10.0,
        fluxdata: vec![120.0; nwave],
        fluxerr: vec![4.0; nwave],
        sta_index: Some(sta_index),
        flag: vec![false; nwave],
        ..Default::default()
    }
}

fn vlti() -> ArrayTable {
    ArrayTable::new("VLTI").with_elements([
        Element::new(1, "A0"),
        Element::new(2, "B2"),
        Element::new(3, "C1"),
        Element::new(4, "D0"),
    ])
}

/// A conformant single-night GRAVITY dataset with three targets, every
/// measurement kind, two wavelength tables and one correlation table.
pub fn sample_dataset() -> Dataset {
    let mut dataset = Dataset::new();
    dataset.header = Header::new().with_telescop("ESO-VLTI").with_instrume("GRAVITY");

    let ids = [1, 2, 3];
    for (id, name) in ids.iter().zip(["HD 100546", "HD 163296", "HD 97048"]) {
        dataset.targets.push(Target::new(*id, name));
    }

    dataset.add_array(vlti());
    dataset.add_wavelength(WavelengthTable::with_channels(
        "GRAVITY_SC",
        SC_WAVES.iter().map(|&w| (w, 1e-7)),
    ));
    dataset.add_wavelength(WavelengthTable::with_channels(
        "GRAVITY_FT",
        FT_WAVES.iter().map(|&w| (w, 2e-7)),
    ));
    dataset.add_corr(CorrTable::new("CORR_SC", 60));

    let sc = SC_WAVES.len();
    let ft = FT_WAVES.len();

    let mut vis = VisTable::new("GRAVITY_SC", sc)
        .with_arrname("VLTI")
        .with_corrname("CORR_SC");
    let mut vis2_sc = Vis2Table::new("GRAVITY_SC", sc).with_arrname("VLTI");
    let mut vis2_ft = Vis2Table::new("GRAVITY_FT", ft).with_arrname("VLTI");
    let mut t3 = T3Table::new("GRAVITY_SC", sc).with_arrname("VLTI");
    let mut flux = FluxTable::new("GRAVITY_SC", sc).with_arrname("VLTI");

    for &id in &ids {
        for sta in BASELINES {
            vis.push(vis_record(id, sta, sc)).unwrap();
            vis2_sc.push(vis2_record(id, sta, sc)).unwrap();
            vis2_ft.push(vis2_record(id, sta, ft)).unwrap();
        }
        for sta in TRIANGLES {
            t3.push(t3_record(id, sta, sc)).unwrap();
        }
        for sta in 1..=4 {
            flux.push(flux_record(id, sta, sc)).unwrap();
        }
    }

    dataset.vis.push(vis);
    dataset.vis2.push(vis2_sc);
    dataset.vis2.push(vis2_ft);
    dataset.t3.push(t3);
    dataset.flux.push(flux);
    dataset
}

/// A small dataset with one OI_VIS2 record per target on baseline 1-2.
pub fn dataset_with_targets(targets: &[(i32, &str)], insname: &str, waves: &[f64]) -> Dataset {
    let mut dataset = Dataset::new();
    for &(id, name) in targets {
        dataset.targets.push(Target::new(id, name));
    }
    dataset.add_array(vlti());
    dataset.add_wavelength(WavelengthTable::with_channels(
        insname,
        waves.iter().map(|&w| (w, 1e-8)),
    ));

    let mut vis2 = Vis2Table::new(insname, waves.len()).with_arrname("VLTI");
    for &(id, _) in targets {
        vis2.push(vis2_record(id, [1, 2], waves.len())).unwrap();
    }
    dataset.vis2.push(vis2);
    dataset
}

fn collect_refs<T: MeasurementTable>(
    tables: &[T],
    arrays: &mut HashSet<String>,
    insnames: &mut HashSet<String>,
    corrs: &mut HashSet<String>,
) {
    for table in tables {
        insnames.insert(table.insname().to_string());
        if let Some(name) = table.arrname() {
            arrays.insert(name.to_string());
        }
        if let Some(name) = table.corrname() {
            corrs.insert(name.to_string());
        }
    }
}

/// Assert that every reference resolves and every lookup table is used.
pub fn assert_consistent(dataset: &Dataset) {
    assert!(
        dataset.missing_references().is_empty(),
        "dangling references: {:?}",
        dataset.missing_references()
    );

    let mut arrays = HashSet::new();
    let mut insnames = HashSet::new();
    let mut corrs = HashSet::new();
    collect_refs(&dataset.vis, &mut arrays, &mut insnames, &mut corrs);
    collect_refs(&dataset.vis2, &mut arrays, &mut insnames, &mut corrs);
    collect_refs(&dataset.t3, &mut arrays, &mut insnames, &mut corrs);
    collect_refs(&dataset.flux, &mut arrays, &mut insnames, &mut corrs);
    for table in &dataset.inspol {
        assert!(arrays.contains(&table.arrname), "orphan OI_INSPOL {}", table.arrname);
        for record in &table.records {
            insnames.insert(record.insname.clone());
        }
    }

    for table in dataset.arrays() {
        assert!(arrays.contains(&table.arrname), "orphan OI_ARRAY {}", table.arrname);
    }
    for table in dataset.wavelengths() {
        assert!(insnames.contains(&table.insname), "orphan OI_WAVELENGTH {}", table.insname);
    }
    for table in dataset.corrs() {
        assert!(corrs.contains(&table.corrname), "orphan OI_CORR {}", table.corrname);
    }
}
