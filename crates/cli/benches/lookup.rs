// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Strategy comparison on a directory-shaped rule set.
//!
//! Rules look like `^//ldml/<section>/<item>[@type="..."]`, the shape the
//! tree and star stores are built for.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use pathmatch::{RegexLookup, Strategy};

const SECTIONS: usize = 20;
const ITEMS: usize = 25;

fn rules() -> Vec<(String, String)> {
    let mut rules = Vec::new();
    for s in 0..SECTIONS {
        for i in 0..ITEMS {
            rules.push((
                format!(r#"^//ldml/s{s}/item{i}\[@type="([^"]*)"\]$"#),
                format!("s{s}.i{i}=$1"),
            ));
        }
        rules.push((format!("^//ldml/s{s}/(.*)$"), format!("s{s}.other")));
    }
    rules
}

fn queries() -> Vec<String> {
    (0..SECTIONS)
        .flat_map(|s| {
            (0..ITEMS)
                .step_by(5)
                .map(move |i| format!(r#"//ldml/s{s}/item{i}[@type="wide"]"#))
        })
        .chain((0..SECTIONS).map(|s| format!("//ldml/s{s}/missing")))
        .collect()
}

fn build(strategy: Strategy, rules: &[(String, String)]) -> RegexLookup<String> {
    let mut lookup = RegexLookup::new(strategy);
    for (pattern, value) in rules {
        lookup.add(pattern, value.clone()).unwrap();
    }
    lookup
}

const STRATEGIES: [Strategy; 3] = [Strategy::Linear, Strategy::Star, Strategy::Tree];

fn bench_build(c: &mut Criterion) {
    let rules = rules();
    let mut group = c.benchmark_group("build");
    group.sample_size(20);
    for strategy in STRATEGIES {
        group.bench_with_input(
            BenchmarkId::from_parameter(strategy),
            &rules,
            |b, rules| b.iter(|| black_box(build(strategy, rules))),
        );
    }
    group.finish();
}

fn bench_first_match(c: &mut Criterion) {
    let rules = rules();
    let queries = queries();
    let mut group = c.benchmark_group("first_match");
    for strategy in STRATEGIES {
        let lookup = build(strategy, &rules);
        group.bench_with_input(
            BenchmarkId::from_parameter(strategy),
            &queries,
            |b, queries| {
                b.iter(|| {
                    for q in queries {
                        black_box(lookup.get_with(q, None));
                    }
                })
            },
        );
    }
    group.finish();
}

fn bench_all_matches(c: &mut Criterion) {
    let rules = rules();
    let queries = queries();
    let mut group = c.benchmark_group("all_matches");
    for strategy in STRATEGIES {
        let lookup = build(strategy, &rules);
        group.bench_with_input(
            BenchmarkId::from_parameter(strategy),
            &queries,
            |b, queries| {
                b.iter(|| {
                    for q in queries {
                        black_box(lookup.get_all(q, None));
                    }
                })
            },
        );
    }
    group.finish();
}

fn bench_diagnose(c: &mut Criterion) {
    let lookup = build(Strategy::Tree, &rules());
    c.bench_function("diagnose_miss", |b| {
        b.iter(|| black_box(lookup.diagnose("//ldml/s3/item7[@type=")))
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_first_match,
    bench_all_matches,
    bench_diagnose
);
criterion_main!(benches);
