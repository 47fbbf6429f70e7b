criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        quantizing_random_signatures,
        binning_sampled_histogram,
        computing_emd_hat_small,
        computing_emd_hat_wide,
        computing_emd_hat_unreduced,
        computing_emd_hat_cost_table,
        computing_emd_hat_grid,
}

fn quantizing_random_signatures(c: &mut criterion::Criterion) {
    let q = Quantizer::new(EMD_SCALE, 96., 11.).unwrap();
    let ref p = Signature::<Bin>::random();
    c.bench_function("quantize a random Signature", |b| {
        b.iter(|| p.weights().iter().map(|&w| q.mass(w)).sum::<i64>())
    });
}

fn binning_sampled_histogram(c: &mut criterion::Criterion) {
    let samples = samples(4096);
    c.bench_function("bin 4096 samples into a 64-bin Histogram", |b| {
        b.iter(|| Histogram::from((samples.as_slice(), 64)))
    });
}

fn computing_emd_hat_small(c: &mut criterion::Criterion) {
    let ref p = Signature::<Bin>::random();
    let ref q = Signature::<Bin>::random();
    c.bench_function("compute EMD-HAT (random bins)", |b| {
        b.iter(|| EMDHat::from((p, q, &Absolute)).distance())
    });
}

fn computing_emd_hat_wide(c: &mut criterion::Criterion) {
    let ref h1 = Histogram::from((samples(1024).as_slice(), 64));
    let ref h2 = Histogram::aligned(&samples(1024), 64, h1);
    c.bench_function("compute EMD-HAT (64-bin Histograms)", |b| {
        b.iter(|| h1.emd(h2))
    });
}

fn computing_emd_hat_unreduced(c: &mut criterion::Criterion) {
    let ref h1 = Histogram::from((samples(1024).as_slice(), 64));
    let ref h2 = Histogram::aligned(&samples(1024), 64, h1);
    let ref p = h1.signature();
    let ref q = h2.signature();
    c.bench_function("compute EMD-HAT (64-bin Histograms, unreduced)", |b| {
        b.iter(|| EMDHat::from((p, q, &Absolute)).unreduced().distance())
    });
}

fn computing_emd_hat_cost_table(c: &mut criterion::Criterion) {
    let ref m = Matrix::random();
    let ref p = (0..m.rows()).map(|i| (i, 1. + i as f64)).collect::<Signature<usize>>();
    let ref q = (0..m.cols()).map(|j| (j, 2. + j as f64)).collect::<Signature<usize>>();
    let ref capped = Thresholded::from((m.clone(), m.max() / 2.));
    c.bench_function("compute EMD-HAT (thresholded cost table)", |b| {
        b.iter(|| EMDHat::from((p, q, capped)).distance())
    });
}

fn computing_emd_hat_grid(c: &mut criterion::Criterion) {
    use rand::Rng;
    let ref mut rng = rand::rng();
    let mut g1 = Grid::new(8, (0., 1.), (0., 1.));
    let mut g2 = Grid::new(8, (0., 1.), (0., 1.));
    for _ in 0..256 {
        g1.increment(rng.random_range(0..8), rng.random_range(0..8));
        g2.increment(rng.random_range(0..8), rng.random_range(0..8));
    }
    c.bench_function("compute EMD-HAT (8x8 Grid, Euclidean)", |b| {
        b.iter(|| g1.emd(&g2))
    });
}

fn samples(n: usize) -> Vec<f64> {
    use rand::Rng;
    let ref mut rng = rand::rng();
    (0..n).map(|_| rng.random_range(0. ..1.)).collect()
}

use emdhat::Absolute;
use emdhat::Arbitrary;
use emdhat::Bin;
use emdhat::EMD_SCALE;
use emdhat::EMDHat;
use emdhat::Grid;
use emdhat::Histogram;
use emdhat::Matrix;
use emdhat::Quantizer;
use emdhat::Signature;
use emdhat::Thresholded;
