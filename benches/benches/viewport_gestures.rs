// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Size, Vec2};
use understory_gesture::velocity::VelocityEstimator;
use understory_image_viewport::{Bounds, ImageViewport};

const CONTAINER: Size = Size::new(1280.0, 800.0);
const NATURAL: Size = Size::new(6000.0, 4000.0);

fn zoomed_viewer() -> ImageViewport<u32> {
    let mut viewer = ImageViewport::new(CONTAINER);
    viewer.set_natural_size(Some(NATURAL));
    viewer.wheel(-2000.0);
    viewer
}

fn bench_clamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_viewport/clamp");
    let bounds = Bounds::new(CONTAINER, Some(NATURAL));
    let offsets: Vec<Vec2> = (0..1_024)
        .map(|i| {
            let t = f64::from(i);
            Vec2::new((t * 37.0) % 4000.0 - 2000.0, (t * 53.0) % 3000.0 - 1500.0)
        })
        .collect();
    group.throughput(Throughput::Elements(offsets.len() as u64));
    group.bench_function("clamp_offset", |b| {
        b.iter(|| {
            for (i, offset) in offsets.iter().enumerate() {
                let scale = 1.0 + (i % 16) as f64 * 0.25;
                black_box(bounds.clamp_offset(*offset, scale));
            }
        });
    });
    group.finish();
}

fn bench_pan(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_viewport/pan");

    // One drag of `moves` pointer moves at 120 Hz, including the release.
    for moves in [16_u32, 256, 4_096] {
        group.throughput(Throughput::Elements(u64::from(moves)));
        group.bench_with_input(BenchmarkId::new("drag", moves), &moves, |b, &moves| {
            b.iter_batched(
                zoomed_viewer,
                |mut viewer| {
                    viewer.pointer_down(1, Point::new(640.0, 400.0), 0);
                    for i in 1..=moves {
                        let t = f64::from(i);
                        let x = 640.0 + (t * 0.7).sin() * 300.0;
                        let position = Point::new(x, 400.0 + t % 50.0);
                        viewer.pointer_move(1, position, u64::from(i) * 8);
                    }
                    viewer.pointer_up(1, u64::from(moves) * 8);
                    black_box(viewer.transform());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_pinch(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_viewport/pinch");
    let moves = 1_024_u32;
    group.throughput(Throughput::Elements(u64::from(moves)));
    group.bench_function("two_finger_spread", |b| {
        b.iter_batched(
            zoomed_viewer,
            |mut viewer| {
                viewer.pointer_down(1, Point::new(600.0, 400.0), 0);
                viewer.pointer_down(2, Point::new(680.0, 400.0), 4);
                for i in 1..=moves {
                    let spread = 80.0 + f64::from(i % 400);
                    viewer.pointer_move(2, Point::new(600.0 + spread, 400.0), u64::from(i) * 8);
                }
                black_box(viewer.scale());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_inertia(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_viewport/inertia");
    group.bench_function("fling_to_rest", |b| {
        b.iter_batched(
            || {
                let mut viewer = zoomed_viewer();
                viewer.pointer_down(1, Point::new(640.0, 400.0), 0);
                for i in 1..=8_u32 {
                    let x = 640.0 - f64::from(i) * 12.0;
                    viewer.pointer_move(1, Point::new(x, 400.0), u64::from(i) * 8);
                }
                viewer.pointer_up(1, 64);
                viewer
            },
            |mut viewer| {
                let mut now = 64;
                while viewer.take_frame_request() {
                    now += 16;
                    black_box(viewer.frame(now));
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_velocity(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/velocity");
    let samples: Vec<Vec2> = (0..1_024)
        .map(|i| Vec2::new(f64::from(i % 7) - 3.0, f64::from(i % 5) - 2.0))
        .collect();
    group.throughput(Throughput::Elements(samples.len() as u64));
    group.bench_function("add_sample", |b| {
        b.iter(|| {
            let mut velocity = VelocityEstimator::default();
            for delta in &samples {
                velocity.add_sample(*delta, 0.008);
            }
            black_box(velocity.velocity())
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_clamp,
    bench_pan,
    bench_pinch,
    bench_inertia,
    bench_velocity
);
criterion_main!(benches);
