//! Criterion benchmarks for the three-point solver and scale estimation.

use criterion::{criterion_group, criterion_main, Criterion};
use floorplan::api::{
    haversine_m, pixels_per_meter, solve_three_point, FloorplanSize, GeomCfg, Point2,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_anchors(rng: &mut StdRng) -> ([Point2; 3], [Point2; 3]) {
    let src = [
        Point2::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)),
        Point2::new(rng.gen_range(400.0..500.0), rng.gen_range(0.0..100.0)),
        Point2::new(rng.gen_range(0.0..100.0), rng.gen_range(400.0..500.0)),
    ];
    let (lng, lat) = (rng.gen_range(-10.0..10.0), rng.gen_range(40.0..55.0));
    let dst = src.map(|p| Point2::new(lng + 1e-5 * p.x, lat - 1e-5 * p.y));
    (src, dst)
}

fn bench_georef(c: &mut Criterion) {
    let cfg = GeomCfg::default();
    let mut group = c.benchmark_group("georef");
    group.bench_function("solve_three_point", |b| {
        let mut rng = StdRng::seed_from_u64(43);
        b.iter(|| {
            let (src, dst) = random_anchors(&mut rng);
            solve_three_point(&src, &dst, &cfg)
        })
    });
    group.bench_function("haversine_m", |b| {
        let a = Point2::new(2.35, 48.85);
        let z = Point2::new(2.36, 48.86);
        b.iter(|| haversine_m(a, z))
    });
    group.bench_function("pixels_per_meter", |b| {
        let mut rng = StdRng::seed_from_u64(44);
        let (src, dst) = random_anchors(&mut rng);
        let size = FloorplanSize::new(500, 500);
        match solve_three_point(&src, &dst, &cfg) {
            Some(map) => b.iter(|| pixels_per_meter(&map, size)),
            None => eprintln!("degenerate anchors; skipping"),
        }
    });
    group.finish();
}

criterion_group!(benches, bench_georef);
criterion_main!(benches);
