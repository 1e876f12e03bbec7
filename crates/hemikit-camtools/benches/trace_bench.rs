use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hemikit_camtools::{GcodeWriter, HemispiralParameters, HemispiralTracer, ProfileSolver};
use hemikit_core::{PrinterProfile, TraceSettings};
use std::f64::consts::PI;
use std::io;

fn bench_profile_solve(c: &mut Criterion) {
    c.bench_function("profile_solve", |b| {
        b.iter(|| {
            ProfileSolver::new(black_box(75.0), 0.2, -0.44 * PI, 0.29)
                .solve()
                .unwrap()
        })
    });
}

fn bench_small_dome(c: &mut Criterion) {
    let params = HemispiralParameters {
        radius: 20.0,
        start: -0.3 * PI,
        end: 0.3 * PI,
        top_width: None,
    };
    let tracer = HemispiralTracer::new(params, TraceSettings::default());
    c.bench_function("trace_small_dome", |b| {
        b.iter(|| {
            let mut g = GcodeWriter::new(io::sink(), PrinterProfile::default());
            tracer.trace(&mut g).unwrap()
        })
    });
}

criterion_group!(benches, bench_profile_solve, bench_small_dome);
criterion_main!(benches);
