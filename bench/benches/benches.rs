use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mountain_core::{
    Align, FlatSpec, MountainConfig, SeededRandom, TerrainGenerator, render_config_svg,
};
use std::hint::black_box;

const SEED: u64 = 2025;

fn config(count: u32, detail: u32) -> MountainConfig {
    let mut config = MountainConfig::default();
    config.stage.width = 1920.0;
    config.peaks.count = count;
    config.peaks.detail = detail;
    config
}

fn bench_generate_by_detail(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate by detail (5 peaks)");
    for detail in [2u32, 4, 6, 8] {
        let generator = TerrainGenerator::new(config(5, detail)).expect("valid config");
        group.bench_with_input(BenchmarkId::from_parameter(detail), &generator, |b, g| {
            b.iter(|| {
                let mut rng = SeededRandom::new(SEED);
                black_box(g.generate(&mut rng))
            })
        });
    }
    group.finish();
}

fn bench_generate_with_flats(c: &mut Criterion) {
    let mut cfg = config(5, 6);
    cfg.flats = Some(
        (1..10)
            .map(|i| FlatSpec {
                pos: i as f64 / 10.0,
                width: 50.0,
                align: Align::Center,
                name: format!("flat{}", i),
            })
            .collect(),
    );
    let generator = TerrainGenerator::new(cfg).expect("valid config");
    c.bench_function("generate + 9 flats (5 peaks, detail 6)", |b| {
        b.iter(|| {
            let mut rng = SeededRandom::new(SEED);
            black_box(generator.generate(&mut rng))
        })
    });
}

fn bench_render_svg(c: &mut Criterion) {
    let cfg = MountainConfig::from_json(
        r##"{ "peaks": { "count": 5, "detail": 6 },
              "shadow": { "color": "#00000040" },
              "ridge": { "color": "#ffffff", "thickness": 1 } }"##,
    )
    .expect("valid config");
    let points = TerrainGenerator::new(cfg.clone())
        .expect("valid config")
        .generate(&mut SeededRandom::new(SEED));
    c.bench_function("render svg with shadow + ridge (detail 6)", |b| {
        b.iter(|| {
            let mut rng = SeededRandom::new(SEED);
            black_box(render_config_svg(&cfg, &points, &mut rng))
        })
    });
}

criterion_group!(
    terrain_benchmarks,
    bench_generate_by_detail,
    bench_generate_with_flats,
    bench_render_svg
);
criterion_main!(terrain_benchmarks);
