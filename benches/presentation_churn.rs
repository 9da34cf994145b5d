// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for presentation-state churn.
//!
//! Measures the performance of:
//! - Showing toasts past the cap (every show evicts the oldest)
//! - Expiring a full queue on one tick
//! - Opening and closing a stack of overlays

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use lab_scheduler::clock::ManualClock;
use lab_scheduler::notifications::{Manager, QueueSettings};
use lab_scheduler::overlays::{OverlayOptions, Registry};
use lab_scheduler::surface::{MemorySurface, Node};
use std::hint::black_box;
use std::time::Duration;

fn queue() -> (Manager<MemorySurface, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let manager = Manager::with_clock(MemorySurface::new(), clock.clone(), QueueSettings::default())
        .unwrap();
    (manager, clock)
}

fn dialog(n: usize) -> Node {
    Node::group(vec![
        Node::heading(format!("Reservation {n}")),
        Node::text("Pick a lab and a time slot."),
        Node::input("lab", ""),
        Node::button("save", "Save"),
    ])
}

/// Benchmark show with eviction.
///
/// The queue is kept full so every show also tears down the oldest toast.
fn bench_show_with_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("notifications");

    group.bench_function("show_evicting_oldest", |b| {
        let (mut manager, _clock) = queue();
        for n in 0..QueueSettings::default().max_visible {
            manager.info(&format!("warm-up {n}"), None).unwrap();
        }
        b.iter(|| {
            let id = manager.info(black_box("Reservation saved"), None).unwrap();
            black_box(id);
        });
    });

    group.bench_function("expire_full_queue", |b| {
        b.iter_batched(
            || {
                let (mut manager, clock) = queue();
                for n in 0..5 {
                    manager
                        .info(&format!("toast {n}"), Some(Duration::from_millis(100)))
                        .unwrap();
                }
                clock.advance_ms(100);
                manager
            },
            |mut manager| black_box(manager.tick()),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Benchmark stacking overlays.
///
/// Measures opening five registered overlays and closing them again,
/// including focus trap capture and scroll lock bookkeeping.
fn bench_overlay_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlays");

    group.bench_function("open_close_stack_of_five", |b| {
        let mut registry = Registry::new(MemorySurface::new()).unwrap();
        let ids: Vec<_> = (0..5)
            .map(|n| registry.create(dialog(n), OverlayOptions::new()).unwrap())
            .collect();
        b.iter(|| {
            for id in &ids {
                registry.open(*id);
            }
            registry.close_all();
            black_box(registry.is_scroll_locked());
        });
    });

    group.bench_function("confirm_preset_round_trip", |b| {
        let mut registry = Registry::new(MemorySurface::new()).unwrap();
        b.iter(|| {
            let id = registry
                .show_confirm(black_box("Approve all pending requests?"), OverlayOptions::new())
                .unwrap();
            black_box(registry.confirm(id));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_show_with_eviction, bench_overlay_stack);
criterion_main!(benches);
