//! Benchmarks for figure rendering: wireframes, filled contours and PNG encoding.
//!
//! Run with: cargo bench --package renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cs_common::{CubedSphere, GridProjection, LatLonGrid, MapSelector, ScalarField};
use renderer::{png, render_grid, render_scalar_field, RenderOptions};

fn hill_field(grid: &LatLonGrid) -> ScalarField {
    ScalarField::from_fn("hill", grid, |lon, lat| (-(lon * lon + lat * lat) * 2.0).exp())
}

fn bench_wireframe(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_grid");
    group.sample_size(10);
    let options = RenderOptions::default();

    for n in [4usize, 16, 32] {
        let mesh = match CubedSphere::new(n, GridProjection::GnomonicEquiangular) {
            Ok(mesh) => mesh,
            Err(_) => continue,
        };
        group.throughput(Throughput::Elements(mesh.cell_count() as u64));
        for selector in MapSelector::ALL {
            group.bench_with_input(
                BenchmarkId::new(selector.as_str(), n),
                &mesh,
                |b, mesh| b.iter(|| black_box(render_grid(mesh, selector, &options))),
            );
        }
    }
    group.finish();
}

fn bench_scalar_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_scalar_field");
    group.sample_size(10);
    let options = RenderOptions::default();
    let mesh = match CubedSphere::new(1, GridProjection::GnomonicEquiangular) {
        Ok(mesh) => mesh,
        Err(_) => return,
    };

    for (nlon, nlat) in [(73usize, 37usize), (361, 181)] {
        let grid = match LatLonGrid::uniform(nlon, nlat) {
            Ok(grid) => grid,
            Err(_) => continue,
        };
        let field = hill_field(&grid);
        for selector in MapSelector::ALL {
            group.bench_with_input(
                BenchmarkId::new(selector.as_str(), format!("{}x{}", nlon, nlat)),
                &field,
                |b, field| {
                    b.iter(|| black_box(render_scalar_field(field, &mesh, &grid, selector, &options)))
                },
            );
        }
    }
    group.finish();
}

fn bench_png_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encoding");
    let (width, height) = (800usize, 800usize);

    // Banded image, fits a palette
    let banded: Vec<u8> = (0..width * height)
        .flat_map(|i| {
            let band = ((i % width) * 8 / width) as u8;
            [band * 30, 255 - band * 30, 128, 255]
        })
        .collect();
    // Smooth gradient, needs RGBA
    let smooth: Vec<u8> = (0..width * height)
        .flat_map(|i| [(i % width) as u8, (i / width) as u8, (i % 251) as u8, 255])
        .collect();

    group.throughput(Throughput::Elements((width * height) as u64));
    group.bench_function("indexed", |b| {
        b.iter(|| black_box(png::encode_png(&banded, width, height, 100)))
    });
    group.bench_function("rgba", |b| {
        b.iter(|| black_box(png::encode_png(&smooth, width, height, 100)))
    });
    group.finish();
}

criterion_group!(benches, bench_wireframe, bench_scalar_field, bench_png_encoding);
criterion_main!(benches);
