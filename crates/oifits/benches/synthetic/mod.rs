//! Random datasets for benchmarks.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use oifits::Dataset;
use oifits::model::{
    ArrayTable, CorrTable, Element, FluxRecord, FluxTable, T3Record, T3Table, Target, Vis2Record,
    Vis2Table, VisRecord, VisTable, WavelengthTable,
};

const STATIONS: i32 = 6;

/// Size of a synthetic dataset.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    pub targets: usize,
    pub records: usize,
    pub nwave: usize,
}

impl Shape {
    pub fn new(targets: usize, records: usize, nwave: usize) -> Self {
        Self {
            targets,
            records,
            nwave,
        }
    }
}

fn values(rng: &mut StdRng, nwave: usize, low: f64, high: f64) -> Vec<f64> {
    (0..nwave).map(|_| rng.gen_range(low..high)).collect()
}

fn flags(rng: &mut StdRng, nwave: usize) -> Vec<bool> {
    (0..nwave).map(|_| rng.gen_bool(0.05)).collect()
}

fn pair(rng: &mut StdRng) -> [i32; 2] {
    let a = rng.gen_range(1..STATIONS);
    [a, rng.gen_range(a + 1..=STATIONS)]
}

/// Build a dataset with one table of each kind, `records` records per
/// table, named `insname` and reproducible from `seed`.
pub fn dataset(shape: Shape, insname: &str, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let nwave = shape.nwave;
    let mut dataset = Dataset::new();

    for id in 1..=shape.targets as i32 {
        dataset.targets.push(Target::new(id, format!("STAR {id}")));
    }
    dataset.add_array(
        ArrayTable::new("VLTI")
            .with_elements((1..=STATIONS).map(|i| Element::new(i, format!("S{i}")))),
    );
    dataset.add_wavelength(WavelengthTable::with_channels(
        insname,
        (0..nwave).map(|k| (1.5e-6 + 1e-8 * k as f64, 1e-8)),
    ));
    dataset.add_corr(CorrTable::new("CORR", 4 * nwave));

    let mut vis = VisTable::new(insname, nwave)
        .with_arrname("VLTI")
        .with_corrname("CORR");
    let mut vis2 = Vis2Table::new(insname, nwave).with_arrname("VLTI");
    let mut t3 = T3Table::new(insname, nwave).with_arrname("VLTI");
    let mut flux = FluxTable::new(insname, nwave).with_arrname("VLTI");

    for _ in 0..shape.records {
        let target_id = rng.gen_range(1..=shape.targets as i32);
        let mjd = 59000.0 + rng.gen_range(0.0..1.0);
        let (u, v) = (rng.gen_range(-130.0..130.0), rng.gen_range(-130.0..130.0));

        let record = VisRecord {
            target_id,
            mjd,
            visamp: values(&mut rng, nwave, 0.0, 1.0),
            visamperr: values(&mut rng, nwave, 0.01, 0.1),
            visphi: values(&mut rng, nwave, -180.0, 180.0),
            visphierr: values(&mut rng, nwave, 0.5, 10.0),
            ucoord: u,
            vcoord: v,
            sta_index: pair(&mut rng),
            flag: flags(&mut rng, nwave),
            ..Default::default()
        };
        vis.push(record).expect("record matches nwave");

        let record = Vis2Record {
            target_id,
            mjd,
            vis2data: values(&mut rng, nwave, 0.0, 1.0),
            vis2err: values(&mut rng, nwave, 0.01, 0.1),
            ucoord: u,
            vcoord: v,
            sta_index: pair(&mut rng),
            flag: flags(&mut rng, nwave),
            ..Default::default()
        };
        vis2.push(record).expect("record matches nwave");

        let [a, b] = pair(&mut rng);
        let record = T3Record {
            target_id,
            mjd,
            t3amp: values(&mut rng, nwave, 0.0, 1.0),
            t3amperr: values(&mut rng, nwave, 0.01, 0.1),
            t3phi: values(&mut rng, nwave, -180.0, 180.0),
            t3phierr: values(&mut rng, nwave, 0.5, 10.0),
            u1coord: u,
            v1coord: v,
            u2coord: rng.gen_range(-130.0..130.0),
            v2coord: rng.gen_range(-130.0..130.0),
            sta_index: [a, b, if b < STATIONS { b + 1 } else { 1 }],
            flag: flags(&mut rng, nwave),
            ..Default::default()
        };
        t3.push(record).expect("record matches nwave");

        let record = FluxRecord {
            target_id,
            mjd,
            fluxdata: values(&mut rng, nwave, 10.0, 100.0),
            fluxerr: values(&mut rng, nwave, 0.5, 5.0),
            sta_index: Some(rng.gen_range(1..=STATIONS)),
            flag: flags(&mut rng, nwave),
            ..Default::default()
        };
        flux.push(record).expect("record matches nwave");
    }

    dataset.vis.push(vis);
    dataset.vis2.push(vis2);
    dataset.t3.push(t3);
    dataset.flux.push(flux);
    dataset
}
