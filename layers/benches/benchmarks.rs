use criterion::{criterion_group, criterion_main, Criterion};
use layers::{PointCollection, Raster};
use survey::Survey;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn reshape(c: &mut Criterion) {
    let mut group = c.benchmark_group("Reshape");

    let survey = Survey::load().unwrap();

    group.bench_with_input("raster", &survey, |b, s| {
        b.iter(|| Raster::from_table(&s.grid, &["x", "y", "dem", "twi", "eca_sh", "eca_dp"]).unwrap())
    });

    group.bench_with_input("points", &survey, |b, s| {
        b.iter(|| PointCollection::from_table(&s.sites, s.crs, "easting", "northing").unwrap())
    });
}

criterion_group!(benches, reshape);
criterion_main!(benches);
