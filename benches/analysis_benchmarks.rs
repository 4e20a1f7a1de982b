//! Benchmarks for per-phase analysis and report rendering

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crouch_start_analysis::{
    analysis::{analyze, Direction, PhaseParams},
    config::AnalysisConfig,
    constants::NUM_POSE_LANDMARKS,
    landmarks::{Landmark, PixelLandmarks, PoseLandmarks, Side},
    report::{render, OutputFormat},
};

/// Random skeleton in a 1920x1080 frame
fn random_landmarks() -> PixelLandmarks {
    let points = (0..NUM_POSE_LANDMARKS)
        .map(|_| Landmark::new(rand::random::<f64>(), rand::random::<f64>()))
        .collect();
    PoseLandmarks::new(points)
        .expect("33 landmarks")
        .to_pixels(1920, 1080)
}

fn benchmark_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");
    let config = AnalysisConfig::default();
    let landmarks = random_landmarks();

    let phases = vec![
        ("set", PhaseParams::Set { front_leg: Side::Left }),
        ("drive", PhaseParams::Drive { front_leg: Side::Right }),
        (
            "air_auto",
            PhaseParams::Air {
                direction: Direction::Auto,
            },
        ),
        (
            "landing_parallax",
            PhaseParams::Landing {
                landing_leg: Side::Left,
                height_cm: 175.0,
                parallax: true,
            },
        ),
    ];

    for (name, params) in phases {
        group.bench_with_input(BenchmarkId::new("analyze", name), &params, |b, params| {
            b.iter(|| black_box(analyze(black_box(params), &landmarks, &config)));
        });
    }

    group.finish();
}

fn benchmark_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");
    let params = PhaseParams::Landing {
        landing_leg: Side::Right,
        height_cm: 170.0,
        parallax: false,
    };
    let report = analyze(&params, &random_landmarks(), &AnalysisConfig::default());

    for (name, format) in [("text", OutputFormat::Text), ("yaml", OutputFormat::Yaml)] {
        group.bench_with_input(BenchmarkId::new("render", name), &format, |b, &format| {
            b.iter(|| black_box(render(black_box(&report), format)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_phases, benchmark_rendering);
criterion_main!(benches);
