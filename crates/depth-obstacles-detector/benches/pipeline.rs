use criterion::{black_box, criterion_group, criterion_main, Criterion};
use depth_obstacles_core::{AnalysisBand, DepthFrame};
use depth_obstacles_detector::{ObstacleDetector, ObstacleDetectorParams};

/// Floor beyond the qualifying depth with three "feet" standing in the band.
fn synthetic_frame() -> DepthFrame {
    let mut frame = DepthFrame::filled(640, 480, 996);
    for (x0, x1, row, code) in [(80, 120, 270, 744), (250, 300, 260, 802), (420, 470, 250, 870)] {
        for x in x0..x1 {
            for y in 196..=row {
                frame.set(x, y, code);
            }
        }
    }
    frame
}

fn bench_pipeline(c: &mut Criterion) {
    let detector =
        ObstacleDetector::new(ObstacleDetectorParams::default()).expect("default detector");
    let frame = synthetic_frame();
    let view = frame.view();

    c.bench_function("detect_default_band", |b| {
        b.iter(|| detector.detect(black_box(&view)).expect("detect"))
    });

    let full = AnalysisBand::full(640, 480);
    c.bench_function("detect_full_frame", |b| {
        b.iter(|| {
            detector
                .detect_in_band(black_box(&view), &full, false)
                .expect("detect")
        })
    });

    c.bench_function("distance_map", |b| {
        b.iter(|| detector.distance_map(black_box(&view)).expect("map"))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
