//! Benchmark template compilation and rendering time.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use benches::context;
use benches::{Engine, Handlebars, Plantilla};

criterion_main! { benches }
criterion_group! { benches, bench_init, bench_compile, bench_render }

const SOURCE: &str = include_str!("../benchdata/accused.hbs");

/// Benchmarks the time taken to create a new instance of the engine.
fn bench_init(c: &mut Criterion) {
    let mut g = c.benchmark_group("init");

    macro_rules! bench {
        ($E:ty) => {{
            g.bench_function(<$E as Engine>::name(), |b| {
                b.iter(|| <$E as Engine>::new());
            });
        }};
    }

    bench!(Handlebars);
    bench!(Plantilla);
}

/// Benchmarks the time taken to compile a template.
fn bench_compile(c: &mut Criterion) {
    let mut g = c.benchmark_group("compile");

    macro_rules! bench {
        ($E:ty) => {{
            g.bench_function(<$E as Engine>::name(), |b| {
                let source = repeat(SOURCE, 50);
                let mut engine = <$E as Engine>::new();
                b.iter(|| {
                    black_box(<$E as Engine>::compile(&mut engine, &source));
                });
            });
        }};
    }

    bench!(Handlebars);
    bench!(Plantilla);
}

/// Benchmarks the time taken to render a template as a string.
fn bench_render(c: &mut Criterion) {
    let mut g = c.benchmark_group("render");

    let ctx = context::random(150);

    macro_rules! bench {
        ($E:ty) => {{
            g.bench_function(<$E as Engine>::name(), |b| {
                let source = repeat(SOURCE, 20);
                let mut engine = <$E as Engine>::new();
                let template = <$E as Engine>::compile(&mut engine, &source);
                b.iter(|| <$E as Engine>::render(&template, &ctx));
            });
        }};
    }

    bench!(Handlebars);
    bench!(Plantilla);
}

fn repeat(source: &str, n: usize) -> String {
    let mut s = String::with_capacity(source.len() * n);
    for _ in 0..n {
        s.push_str(source);
    }
    s
}
