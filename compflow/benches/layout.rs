use criterion::{black_box, criterion_group, criterion_main, Criterion};

use compflow::{layout, svg, STAGES};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("layout pipeline", |b| {
        b.iter(|| black_box(layout(black_box(&STAGES))))
    });

    let figure = layout(&STAGES);
    c.bench_function("export svg", |b| b.iter(|| black_box(svg::render(&figure))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
