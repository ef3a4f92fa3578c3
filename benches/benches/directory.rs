// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directory listing and natural ordering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use waymark_directory::{Directory, natural_cmp, synchronize};
use waymark_hierarchy::{Hierarchy, Shape};

fn building(rooms: usize, walls: usize) -> Hierarchy {
    let mut shapes = Vec::with_capacity(rooms * (walls + 1));
    for r in 0..rooms {
        let room = format!("room {r}");
        for w in 0..walls {
            shapes.push(Shape::new(format!("{room} wall {w}")).with_parent(room.as_str()));
        }
        shapes.push(Shape::new(room));
    }
    Hierarchy::from_shapes(shapes)
}

fn bench_directory(c: &mut Criterion) {
    let mut group = c.benchmark_group("waymark_directory");

    for &(rooms, walls) in &[(16_usize, 8_usize), (128, 16)] {
        let h = building(rooms, walls);
        group.bench_function(format!("synchronize(rooms={rooms},walls={walls})"), |b| {
            b.iter(|| black_box(synchronize(&h)));
        });

        let mut cache = Directory::new();
        cache.refresh(&h);
        group.bench_function(format!("refresh_clean(rooms={rooms},walls={walls})"), |b| {
            b.iter(|| black_box(cache.refresh(&h)));
        });
    }

    let ids: Vec<String> = (0..512).rev().map(|i| format!("wall {i}")).collect();
    group.bench_function("natural_sort(512)", |b| {
        b.iter(|| {
            let mut ids = ids.clone();
            ids.sort_by(|a, b| natural_cmp(a, b));
            black_box(ids)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_directory);
criterion_main!(benches);
