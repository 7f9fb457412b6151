//! Performance benchmarks for the per-frame posture pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use spine_alignment::{
    alignment::score_alignment,
    constants::POSE_LANDMARK_COUNT,
    landmarks::{index, project, NormalizedJoint},
    pipeline::PostureAnalyzer,
    render::{path::DEFAULT_CURVE_STEPS, spine_curve, RecordingSurface},
    spine::SpineModel,
};

/// Upright body with jittered landmarks, as a pose model would report it
fn jittered_body(rng: &mut StdRng) -> Vec<NormalizedJoint> {
    let mut jitter = |x: f64, y: f64| NormalizedJoint::new(x + rng.gen_range(-0.02..0.02), y + rng.gen_range(-0.02..0.02));

    let mut joints: Vec<NormalizedJoint> = (0..POSE_LANDMARK_COUNT).map(|_| jitter(0.5, 0.6)).collect();
    joints[index::NOSE] = jitter(0.5, 0.2);
    joints[index::LEFT_SHOULDER] = jitter(0.4, 0.35);
    joints[index::RIGHT_SHOULDER] = jitter(0.6, 0.35);
    joints[index::LEFT_HIP] = jitter(0.45, 0.7);
    joints[index::RIGHT_HIP] = jitter(0.55, 0.7);
    joints
}

fn bench_analysis(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let frames: Vec<Vec<NormalizedJoint>> = (0..256).map(|_| jittered_body(&mut rng)).collect();
    let analyzer = PostureAnalyzer::default();

    let mut group = c.benchmark_group("analysis");

    group.bench_function("project_and_score", |b| {
        let mut i = 0;
        b.iter(|| {
            let pixels = project(&frames[i % frames.len()], 640.0, 480.0);
            let spine = SpineModel::build(&pixels);
            i += 1;
            black_box(score_alignment(spine.as_ref(), 640.0))
        });
    });

    group.bench_function("analyze", |b| {
        let mut i = 0;
        b.iter(|| {
            let report = analyzer.analyze(Some(&frames[i % frames.len()]), 640.0, 480.0);
            i += 1;
            black_box(report)
        });
    });

    group.finish();
}

fn bench_process_frame(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let frames: Vec<Vec<NormalizedJoint>> = (0..256).map(|_| jittered_body(&mut rng)).collect();

    let mut group = c.benchmark_group("process_frame");

    for (width, height) in [(640.0, 480.0), (1280.0, 720.0), (1920.0, 1080.0)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &(width, height),
            |b, &(width, height)| {
                let mut analyzer = PostureAnalyzer::default();
                let mut surface = RecordingSurface::new(width, height);
                let mut i = 0;
                b.iter(|| {
                    surface.clear();
                    let report = analyzer.process_frame(Some(&frames[i % frames.len()]), &mut surface);
                    i += 1;
                    black_box(report)
                });
            },
        );
    }

    group.bench_function("undetected", |b| {
        let mut analyzer = PostureAnalyzer::default();
        let mut surface = RecordingSurface::new(640.0, 480.0);
        b.iter(|| {
            surface.clear();
            black_box(analyzer.process_frame(None, &mut surface))
        });
    });

    group.finish();
}

fn bench_spine_curve(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let pixels = project(&jittered_body(&mut rng), 640.0, 480.0);
    let Some(spine) = SpineModel::build(&pixels) else {
        return;
    };
    let points = spine.points();

    let mut group = c.benchmark_group("spine_curve");

    for steps in [4, DEFAULT_CURVE_STEPS, 64] {
        group.bench_with_input(BenchmarkId::new("flatten", steps), &steps, |b, &steps| {
            b.iter(|| black_box(spine_curve(black_box(&points)).flatten(steps)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analysis, bench_process_frame, bench_spine_curve);
criterion_main!(benches);
