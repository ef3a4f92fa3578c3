// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural hierarchy edits.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use waymark_hierarchy::{Hierarchy, Shape};

/// `rooms` top-level rooms with `walls` walls each.
fn building(rooms: usize, walls: usize) -> Vec<Shape> {
    let mut out = Vec::with_capacity(rooms * (walls + 1));
    for r in 0..rooms {
        let room = format!("room {r}");
        for w in 0..walls {
            let x = (w * 10) as f64;
            out.push(
                Shape::new(format!("{room} wall {w}"))
                    .with_parent(room.as_str())
                    .with_vertices([Point::new(x, 0.0), Point::new(x + 10.0, 0.0)]),
            );
        }
        out.push(Shape::new(room));
    }
    out
}

/// A single chain `n0 <- n1 <- ... <- n{len-1}`.
fn chain(len: usize) -> Vec<Shape> {
    (0..len)
        .map(|i| {
            let shape = Shape::new(format!("n{i}"));
            if i == 0 {
                shape
            } else {
                shape.with_parent(format!("n{}", i - 1))
            }
        })
        .collect()
}

fn bench_hierarchy(c: &mut Criterion) {
    let mut group = c.benchmark_group("waymark_hierarchy");

    for &(rooms, walls) in &[(16_usize, 8_usize), (128, 16)] {
        let shapes = building(rooms, walls);
        group.bench_function(format!("load(rooms={rooms},walls={walls})"), |b| {
            b.iter_batched(
                || shapes.clone(),
                |shapes| black_box(Hierarchy::from_shapes(shapes)),
                BatchSize::SmallInput,
            );
        });

        let h = Hierarchy::from_shapes(shapes);
        group.bench_function(format!("rename_room(rooms={rooms},walls={walls})"), |b| {
            b.iter_batched(
                || h.clone(),
                |mut h| {
                    h.rename("room 0", "hall").ok();
                    black_box(h)
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("reparent_room(rooms={rooms},walls={walls})"), |b| {
            b.iter_batched(
                || h.clone(),
                |mut h| {
                    h.reparent("room 0", "room 1").ok();
                    black_box(h)
                },
                BatchSize::SmallInput,
            );
        });
    }

    // Cycle checks walk the whole chain from the new parent upwards.
    for &len in &[16_usize, 96] {
        let h = Hierarchy::from_shapes(chain(len));
        let leaf = format!("n{}", len - 1);
        group.bench_function(format!("reject_cycle(chain={len})"), |b| {
            b.iter_batched(
                || h.clone(),
                |mut h| {
                    let err = h.reparent("n0", &leaf).is_err();
                    black_box((h, err))
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hierarchy);
criterion_main!(benches);
