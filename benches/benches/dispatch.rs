// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred action offers and firing.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use waymark_dispatch::{DeferredActions, OfferMode};
use waymark_input::{Button, ButtonSet};

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("waymark_dispatch");
    for &layers in &[8_usize, 64] {
        // One click contested by every layer.
        group.bench_function(format!("offer_fire(layers={layers})"), |b| {
            let mut actions = DeferredActions::<usize>::new();
            b.iter(|| {
                actions.begin_frame(ButtonSet::PRIMARY | ButtonSet::SECONDARY);
                for layer in 0..layers {
                    actions.offer(Button::Primary, layer, OfferMode::Overwrite);
                    actions.offer(Button::Secondary, layer, OfferMode::KeepExisting);
                }
                let mut fired = 0;
                actions.fire_all(|_, a| fired += a);
                black_box(fired)
            });
        });
    }

    // Frames with nothing pressed: every offer is dropped.
    group.bench_function("offer_unarmed(layers=64)", |b| {
        let mut actions = DeferredActions::<usize>::new();
        b.iter(|| {
            actions.begin_frame(ButtonSet::empty());
            for layer in 0..64 {
                actions.offer(Button::Primary, layer, OfferMode::Overwrite);
            }
            black_box(actions.is_populated(Button::Primary))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
