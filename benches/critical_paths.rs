//! Criterion benchmarks for Conceptforge critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Renderers: character, weapon and environment scenes
//! - Post-processing: noise, gradient compositing, Gaussian blur
//! - Pipeline: a full render including the title overlay

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use conceptforge::draw::DrawContext;
use conceptforge::output::DirStore;
use conceptforge::palettes::Theme;
use conceptforge::pipeline::{AssetKind, AssetPipeline, GenerationRequest, CANVAS_SIZE};
use conceptforge::postprocess::{composite_gradient, gaussian_blur, inject_noise};
use conceptforge::render::{render_character, render_environment, render_weapon};
use conceptforge::rng::DrawRng;
use image::{Rgb, RgbImage};

fn bench_renderers(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    group.bench_function("character", |b| {
        let palette = Theme::Wizard.palette();
        b.iter(|| {
            let mut ctx = DrawContext::transparent(CANVAS_SIZE, CANVAS_SIZE);
            render_character(&mut ctx, &palette, black_box("battle mage"), &mut DrawRng::seeded(1));
            ctx
        })
    });

    for weapon in ["sword", "axe", "bow", "staff", "dagger"] {
        group.bench_with_input(BenchmarkId::new("weapon", weapon), weapon, |b, weapon| {
            let palette = Theme::Warrior.palette();
            b.iter(|| {
                let mut ctx = DrawContext::transparent(CANVAS_SIZE, CANVAS_SIZE);
                render_weapon(&mut ctx, &palette, weapon, &mut DrawRng::seeded(1));
                ctx
            })
        });
    }

    for scene in ["forest", "mountain", "castle", "desert", "cave"] {
        group.bench_with_input(BenchmarkId::new("environment", scene), scene, |b, scene| {
            let palette = Theme::Elf.palette();
            b.iter(|| {
                let mut ctx = DrawContext::filled(CANVAS_SIZE, CANVAS_SIZE, Rgb([0, 0, 0]));
                render_environment(&mut ctx, &palette, scene, &mut DrawRng::seeded(1));
                ctx
            })
        });
    }

    group.finish();
}

fn bench_postprocess(c: &mut Criterion) {
    let mut group = c.benchmark_group("postprocess");
    group.throughput(Throughput::Elements((CANVAS_SIZE * CANVAS_SIZE) as u64));

    let base = RgbImage::from_fn(CANVAS_SIZE, CANVAS_SIZE, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });

    group.bench_function("noise_0.05", |b| {
        b.iter(|| {
            let mut img = base.clone();
            inject_noise(&mut img, black_box(0.05), &mut DrawRng::seeded(7));
            img
        })
    });

    let mut ctx = DrawContext::transparent(CANVAS_SIZE, CANVAS_SIZE);
    render_weapon(&mut ctx, &Theme::Warrior.palette(), "sword", &mut DrawRng::seeded(3));
    group.bench_function("composite_gradient", |b| {
        b.iter(|| composite_gradient(black_box(ctx.canvas()), Rgb([40, 40, 60]), Rgb([20, 20, 40])))
    });

    for sigma in [0.3f32, 0.5] {
        group.bench_with_input(BenchmarkId::new("gaussian_blur", sigma), &sigma, |b, sigma| {
            b.iter(|| gaussian_blur(black_box(&base), *sigma))
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(20);

    // render() never touches the store
    let pipeline = AssetPipeline::new(DirStore::new(std::env::temp_dir().join("conceptforge-bench")));
    for (kind, subject) in [
        (AssetKind::Character, "fantasy warrior"),
        (AssetKind::Weapon, "sword"),
        (AssetKind::Environment, "forest"),
    ] {
        let request = GenerationRequest::new(kind, subject).with_seed(Some(42));
        group.bench_with_input(BenchmarkId::new("render", kind), &request, |b, request| {
            b.iter(|| pipeline.render(request, &mut DrawRng::seeded(42)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_renderers, bench_postprocess, bench_pipeline);
criterion_main!(benches);
