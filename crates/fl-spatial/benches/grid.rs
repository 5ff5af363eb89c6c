use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fl_core::{Bounds, Vec3};
use fl_spatial::{GridSpec, SpatialGrid};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn cloud(n: usize) -> Vec<Vec3> {
    let mut rng = SmallRng::seed_from_u64(0xB01D);
    (0..n)
        .map(|_| Vec3::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5)))
        .collect()
}

fn bench_grid(c: &mut Criterion) {
    let spec = GridSpec::new(0.1, Bounds::cube(-0.5, 0.5)).expect("valid spec");
    let mut group = c.benchmark_group("spatial_grid");

    for &n in &[4_096usize, 32_768] {
        let pts = cloud(n);

        group.bench_with_input(BenchmarkId::new("rebuild", n), &pts, |b, pts| {
            let mut grid = SpatialGrid::new(spec).expect("grid");
            b.iter(|| grid.rebuild(black_box(pts)));
        });

        group.bench_with_input(BenchmarkId::new("query_all", n), &pts, |b, pts| {
            let mut grid = SpatialGrid::new(spec).expect("grid");
            grid.rebuild(pts);
            b.iter(|| {
                let mut hits = 0usize;
                for &p in pts {
                    hits += grid
                        .query_items(p, 0.1)
                        .expect("radius fits")
                        .filter(|&j| pts[j].distance_squared(p) < 0.01)
                        .count();
                }
                black_box(hits)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grid);
criterion_main!(benches);
