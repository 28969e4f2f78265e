//! Resolution and registration benchmarks.
//!
//! Covers the hot paths: value injection, memoized lazy injection after
//! first materialization, multi-registry search, and batch registration.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use di::{chain, inject, lazy, provide, Container};

#[derive(Debug, Clone)]
struct Config {
    dsn: String,
}

#[derive(Debug, Clone)]
struct Connection {
    url: String,
}

fn bench_value_injection(c: &mut Criterion) {
    let container = Container::new();
    container.must_add([provide(Config {
        dsn: "mysql://localhost:3306/bench".into(),
    })]);

    c.bench_function("inject_value", |b| {
        b.iter(|| {
            let cfg: Config = container.inject().expect("Config should resolve");
            black_box(cfg)
        })
    });
}

fn bench_memoized_lazy_injection(c: &mut Criterion) {
    let container = Container::new();
    container.must_add([
        provide(Config {
            dsn: "mysql://localhost:3306/bench".into(),
        }),
        lazy(|owner: &Container| {
            let cfg: Config = owner.inject()?;
            Ok(Connection { url: cfg.dsn })
        }),
    ]);
    // Materialize once so the benchmark measures the memoized path.
    let _: Connection = container.inject().expect("warmup");

    c.bench_function("inject_lazy_memoized", |b| {
        b.iter(|| {
            let conn: Connection = container.inject().expect("Connection should resolve");
            black_box(conn)
        })
    });
}

fn bench_chain_pipeline(c: &mut Criterion) {
    #[derive(Debug, Clone)]
    struct Repository {
        url: String,
    }

    let container = Container::new();
    container.must_add([
        provide(Config {
            dsn: "mysql://localhost:3306/bench".into(),
        }),
        chain(|cfg: Config| Ok(Connection { url: cfg.dsn })),
        chain(|conn: Connection| Ok(Repository { url: conn.url })),
    ]);
    let _: Repository = container.inject().expect("warmup");

    c.bench_function("inject_chain_memoized", |b| {
        b.iter(|| {
            let repo: Repository = container.inject().expect("Repository should resolve");
            black_box(repo)
        })
    });
}

fn bench_multi_registry_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_registry_search");

    for depth in [1usize, 4, 16] {
        let containers: Vec<Container> = (0..depth)
            .map(|i| {
                let container = Container::new();
                if i + 1 == depth {
                    container.must_add([provide(Config {
                        dsn: "found-in-last".into(),
                    })]);
                }
                container
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            let refs: Vec<&Container> = containers.iter().collect();
            b.iter(|| {
                let cfg: Config = inject(&refs).expect("last registry serves Config");
                black_box(cfg)
            })
        });
    }

    group.finish();
}

fn bench_registration(c: &mut Criterion) {
    c.bench_function("add_provider", |b| {
        b.iter(|| {
            let container = Container::new();
            container
                .add([provide(Config {
                    dsn: "mysql://localhost:3306/bench".into(),
                })])
                .expect("registration should succeed");
            black_box(container)
        })
    });
}

criterion_group!(
    benches,
    bench_value_injection,
    bench_memoized_lazy_injection,
    bench_chain_pipeline,
    bench_multi_registry_search,
    bench_registration
);
criterion_main!(benches);
