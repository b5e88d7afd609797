#[macro_use]
extern crate log;

use common::Filter;
use glsw_filters::Glsw;
use nalgebra::{DMatrix, Dim, Matrix};
use nanorand::{Rng, WyRand};

const SAMPLES: usize = 64;
const CHANNELS: usize = 24;
const SEED: u64 = 0;
const ALPHA: f64 = 0.01;

/// Synthetic spectra: a smooth analyte band with per-sample amplitude,
/// plus a structured baseline tilt in the second measurement condition
fn generate_conditions(rng: &mut WyRand) -> (DMatrix<f64>, DMatrix<f64>) {
    let amplitudes: Vec<f64> = (0..SAMPLES).map(|_| rng.generate::<f64>() * 2.0).collect();
    let tilts: Vec<f64> = (0..SAMPLES).map(|_| rng.generate::<f64>() - 0.5).collect();

    let x1: DMatrix<f64> = Matrix::from_fn_generic(
        Dim::from_usize(SAMPLES),
        Dim::from_usize(CHANNELS),
        |i, j| {
            let pos = j as f64 / (CHANNELS - 1) as f64;
            amplitudes[i] * (std::f64::consts::PI * pos).sin()
        },
    );
    let x2: DMatrix<f64> = Matrix::from_fn_generic(
        Dim::from_usize(SAMPLES),
        Dim::from_usize(CHANNELS),
        |i, j| {
            let pos = j as f64 / (CHANNELS - 1) as f64;
            x1[(i, j)] + tilts[i] * pos
        },
    );

    (x1, x2)
}

pub(crate) fn main() {
    pretty_env_logger::init();

    let mut rng = WyRand::new_seed(SEED);
    let (x1, x2) = generate_conditions(&mut rng);
    info!("generated {} samples with {} channels per condition", SAMPLES, CHANNELS);

    let mut glsw = Glsw::new(ALPHA).expect("alpha is positive");
    glsw.configure(&x1, &x2).expect("conditions share one shape");

    let filtered1 = glsw.transform(&x1).expect("filter is configured");
    let filtered2 = glsw.transform(&x2).expect("filter is configured");

    let gap_before = (&x2 - &x1).norm();
    let gap_after = (&filtered2 - &filtered1).norm();
    info!("between-condition gap: {:.4} before, {:.4} after filtering", gap_before, gap_after);
    info!("retained signal energy: {:.4} of {:.4}", filtered1.norm(), x1.norm());
}
