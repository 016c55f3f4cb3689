//! Benchmarks for tearcloth simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use tearcloth::*;

fn bench_default_cloth(c: &mut Criterion) {
    c.bench_function("cloth_10x35_60_steps", |b| {
        b.iter(|| {
            let mut mesh: ClothMesh<f32> = ClothMesh::new(ClothConfig::new()).unwrap();
            mesh.pin_particle(25, Vec2::new(570.0, 50.0)).unwrap();
            for _ in 0..60 {
                mesh.step(0.016);
            }
            mesh.positions()
        });
    });
}

fn bench_large_cloth(c: &mut Criterion) {
    c.bench_function("cloth_60x40_60_steps", |b| {
        b.iter(|| {
            let config = ClothConfig::new()
                .with_grid(60, 40)
                .with_spacing(8.0)
                .with_auto_tear(true);
            let mut mesh: ClothMesh<f32> = ClothMesh::new(config).unwrap();
            for col in 0..mesh.columns() {
                let pos = mesh.particle_at(col, 0).unwrap().pos;
                mesh.pin_particle(col, pos).unwrap();
            }
            for _ in 0..60 {
                mesh.step(0.016);
            }
            mesh.positions()
        });
    });
}

fn bench_cutting(c: &mut Criterion) {
    c.bench_function("cloth_cut_sweep", |b| {
        b.iter(|| {
            let mut mesh: ClothMesh<f32> = ClothMesh::new(ClothConfig::new()).unwrap();
            let mut cut = 0;
            for row in 0..36 {
                cut += mesh.cut_near(Vec2::new(600.0, 20.0 + row as f32 * 15.0), 8.0);
            }
            cut
        });
    });
}

criterion_group!(benches, bench_default_cloth, bench_large_cloth, bench_cutting);
criterion_main!(benches);
