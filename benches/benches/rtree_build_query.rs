// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_bounds::BoundingBox;
use canopy_rtree::RTree;
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn gen_grid_points(n: usize, step: i64) -> Vec<[i64; 2]> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push([x as i64 * step, y as i64 * step]);
        }
    }
    out
}

fn build_tree(points: &[[i64; 2]], max_entries: usize) -> RTree {
    let mut tree = RTree::new(max_entries);
    for (i, p) in points.iter().enumerate() {
        let _ = tree.insert(p, i as u64);
    }
    tree
}

fn bench_rtree_build_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_build_query");
    for &n in &[32_usize, 64] {
        let points = gen_grid_points(n, 10);
        let query = BoundingBox::new(&[100, 100], &[400, 400]);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("build_query_range_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let tree = build_tree(&points, 8);
                    let report = tree.query_range(&query).unwrap();
                    black_box(report.result_count);
                },
                BatchSize::SmallInput,
            )
        });

        let tree = build_tree(&points, 8);
        group.bench_function(format!("query_point_n{}", n), |b| {
            b.iter(|| black_box(tree.query_point(black_box(&[150, 150]))))
        });

        group.bench_function(format!("query_range_n{}", n), |b| {
            b.iter(|| {
                let report = tree.query_range(black_box(&query)).unwrap();
                black_box(report.result_count)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_build_query);
criterion_main!(benches);
