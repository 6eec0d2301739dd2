use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::DVec3;

use tribune_layout::geometry::Line;
use tribune_layout::optimization::{evaluate, Candidate};
use tribune_layout::setup::{
    AudienceSetup, ProjectorSetup, RailingSetup, ScreenSetup, StairSetup, TribuneSetup,
};

fn candidate(rows: usize) -> Candidate {
    Candidate::new(
        TribuneSetup::new(rows, vec![80.0, 90.0], vec![2, 3], vec![false, true])
            .expect("valid tribune"),
        StairSetup::new(15.0, 30.0).expect("valid stairs"),
        RailingSetup::new(90.0, 5.0).expect("valid railings"),
    )
    .with_audiences(vec![AudienceSetup::new(
        DVec3::new(40.0, 0.0, 110.0),
        DVec3::ZERO,
    )])
    .with_screen(ScreenSetup::from_line(Line::new(
        DVec3::new(-800.0, 0.0, 100.0),
        DVec3::new(-800.0, 0.0, 500.0),
    )))
    .with_projector(ProjectorSetup::new(DVec3::new(4000.0, 0.0, 900.0)))
}

fn bench_evaluate(c: &mut Criterion) {
    let small = candidate(10);
    let large = candidate(80);

    c.bench_function("evaluate_10_rows", |b| b.iter(|| evaluate(black_box(&small))));
    c.bench_function("evaluate_80_rows", |b| b.iter(|| evaluate(black_box(&large))));
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
