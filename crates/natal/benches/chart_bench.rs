use criterion::{black_box, criterion_group, criterion_main, Criterion};
use natal::chart::{locate, ChartBuilder, HouseCusps};
use natal::ephemeris::{Body, CelestialBody};
use natal::western::classify;

fn placidus_like_cusps() -> HouseCusps {
    HouseCusps::new([
        101.2, 122.0, 145.3, 175.8, 210.4, 245.1, 281.2, 302.0, 325.3, 355.8, 30.4, 65.1,
    ])
    .expect("valid cusps")
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify", |b| b.iter(|| classify(black_box(-1234.567))));
}

fn bench_locate(c: &mut Criterion) {
    let cusps = placidus_like_cusps();
    c.bench_function("locate", |b| {
        b.iter(|| locate(black_box(88.8), black_box(&cusps)))
    });
}

fn bench_build_chart(c: &mut Criterion) {
    let cusps = placidus_like_cusps();
    let bodies: Vec<CelestialBody> = Body::PLANETS
        .iter()
        .enumerate()
        .map(|(i, body)| CelestialBody::new(*body, (i as f64) * 37.3))
        .collect();

    c.bench_function("build_chart", |b| {
        b.iter(|| ChartBuilder.build(black_box(&bodies), black_box(&cusps)))
    });
}

criterion_group!(benches, bench_classify, bench_locate, bench_build_chart);
criterion_main!(benches);
