use RustedDeriv::{compute_derivative, evaluate_at_point, format_step_for_display};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_polynomial(c: &mut Criterion) {
    c.bench_function("polynomial, first derivative", |b| {
        b.iter(|| compute_derivative(black_box("x^5 + 3*x^4 - 2*x^3 + x^2 - 7*x + 1"), "x", 1))
    });
}

fn bench_higher_order(c: &mut Criterion) {
    c.bench_function("x^2*sin(x) + e^x, fourth derivative", |b| {
        b.iter(|| compute_derivative(black_box("x^2*sin(x) + e^x"), "x", 4))
    });
}

fn bench_evaluate(c: &mut Criterion) {
    c.bench_function("evaluate at point", |b| {
        b.iter(|| evaluate_at_point(black_box("3*x^2 + 4*x + 1 - sin(x)/x"), "x", black_box(0.7)))
    });
}

fn bench_display(c: &mut Criterion) {
    let steps = compute_derivative("x^3*cos(x) + ln(x)", "x", 2)
        .map(|r| r.steps().to_vec())
        .unwrap_or_default();
    c.bench_function("format steps", |b| {
        b.iter(|| {
            steps
                .iter()
                .map(|s| format_step_for_display(black_box(s)))
                .collect::<Vec<_>>()
        })
    });
}

criterion_group!(benches, bench_polynomial, bench_higher_order, bench_evaluate, bench_display);
criterion_main!(benches);
