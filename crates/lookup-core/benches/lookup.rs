use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lookup_core::index::PrefixIndex;
use lookup_core::metric::{JaroWinkler, Levenshtein, Metric, MetricKind, MetricRegistry};

/// Synthetic command vocabulary: "<verb> <object><n>".
fn vocabulary(size: usize) -> Vec<String> {
    let verbs = ["give", "take", "tp", "gamemode", "kick", "ban", "summon", "fill"];
    let objects = ["diamond", "dirt", "diorite", "player", "zombie", "creeper"];
    (0..size)
        .map(|n| {
            format!(
                "{} {}{}",
                verbs[n % verbs.len()],
                objects[(n / verbs.len()) % objects.len()],
                n
            )
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for size in [1_000, 10_000] {
        let words = vocabulary(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &words, |b, words| {
            b.iter(|| words.iter().collect::<PrefixIndex>())
        });
    }
    group.finish();
}

fn bench_match(c: &mut Criterion) {
    let index: PrefixIndex = vocabulary(10_000).iter().collect();
    let mut group = c.benchmark_group("match_prefix");
    for prefix in ["g", "give d", "give diamond12", "nothing"] {
        group.bench_with_input(BenchmarkId::from_parameter(prefix), &prefix, |b, prefix| {
            b.iter(|| index.match_prefix(black_box(prefix)))
        });
    }
    group.finish();

    c.bench_function("complete/give_d", |b| {
        b.iter(|| index.complete(black_box(&["give", "d"])))
    });
}

fn bench_metrics(c: &mut Criterion) {
    let pairs = [
        ("dirt", "dirty"),
        ("gamemode creative", "gamemode creatvie"),
        ("summon zombie", "sumon zombei villager"),
    ];
    let mut group = c.benchmark_group("metric");
    for (x, y) in pairs {
        group.bench_with_input(BenchmarkId::new("jaro_winkler", x), &(x, y), |b, (x, y)| {
            b.iter(|| JaroWinkler.calculate(black_box(x.as_bytes()), black_box(y.as_bytes())))
        });
        group.bench_with_input(BenchmarkId::new("levenshtein", x), &(x, y), |b, (x, y)| {
            b.iter(|| Levenshtein.calculate(black_box(x.as_bytes()), black_box(y.as_bytes())))
        });
    }
    group.finish();

    let registry = MetricRegistry::new(MetricKind::ALL);
    c.bench_function("registry/rank", |b| {
        b.iter(|| registry.rank(black_box("jaro_winkler"), b"give dirt", b"give drit"))
    });
}

criterion_group!(benches, bench_insert, bench_match, bench_metrics);
criterion_main!(benches);
