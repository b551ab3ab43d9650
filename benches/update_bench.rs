use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::DVec3;
use trackball::input::{MouseButton, WheelDeltaMode};
use trackball::{
    Camera, HeadlessSurface, InputEvent, Options, TrackballControls,
};

fn controls() -> TrackballControls<HeadlessSurface> {
    let camera =
        Camera::perspective(DVec3::new(0.0, 0.0, 5.0), 50.0, 4.0 / 3.0);
    TrackballControls::new(
        camera,
        DVec3::ZERO,
        HeadlessSurface::new(800.0, 600.0),
        Options::default(),
    )
    .unwrap()
}

fn idle_update_benchmark(c: &mut Criterion) {
    let mut controls = controls();
    c.bench_function("update_idle", |b| {
        b.iter(|| black_box(controls.update().unwrap()))
    });
}

fn coasting_update_benchmark(c: &mut Criterion) {
    c.bench_function("update_coasting", |b| {
        let mut controls = controls();
        controls
            .handle_event(&InputEvent::PointerDown {
                button: MouseButton::Left,
                x: 500.0,
                y: 300.0,
            })
            .unwrap();
        controls
            .handle_event(&InputEvent::PointerMove { x: 400.0, y: 300.0 })
            .unwrap();
        b.iter(|| black_box(controls.update().unwrap()))
    });
}

fn drag_frame_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_frame");
    for events_per_frame in [1, 4, 16] {
        group.bench_function(format!("{events_per_frame}_moves"), |b| {
            let mut controls = controls();
            controls
                .handle_event(&InputEvent::PointerDown {
                    button: MouseButton::Left,
                    x: 400.0,
                    y: 300.0,
                })
                .unwrap();
            let mut x = 400.0;
            b.iter(|| {
                for _ in 0..events_per_frame {
                    x = if x > 700.0 { 100.0 } else { x + 3.0 };
                    controls
                        .handle_event(&InputEvent::PointerMove { x, y: 300.0 })
                        .unwrap();
                }
                controls
                    .handle_event(&InputEvent::Wheel {
                        delta_y: 1.0,
                        mode: WheelDeltaMode::Pixel,
                    })
                    .unwrap();
                black_box(controls.update().unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    idle_update_benchmark,
    coasting_update_benchmark,
    drag_frame_benchmark
);
criterion_main!(benches);
