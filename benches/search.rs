//! Benchmarks for index compilation and per-keystroke search
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use docsift::index::{build_search_index, DocObject, IndexConfig, SearchIndex};
use docsift::query::SearchSession;

const WORDS: &[&str] = &[
    "Active", "Record", "Support", "Cache", "Store", "Controller", "Metal", "Hash", "With",
    "Indifferent", "Access", "Callbacks", "Association", "Reflection", "Migration", "Schema",
];

const MEMBERS: &[&str] = &[
    "fetch", "fetch_multi", "write", "read", "delete", "exist?", "controller_name", "to_param",
    "find_each", "where", "reload", "save!", "update_columns", "transaction",
];

/// Synthetic corpus: nested containers, each with a handful of members
fn create_corpus(containers: usize) -> Vec<DocObject> {
    let mut objects = Vec::with_capacity(containers * 5);
    for i in 0..containers {
        let name = format!(
            "{}::{}{}::{}",
            WORDS[i % WORDS.len()],
            WORDS[(i * 7 + 3) % WORDS.len()],
            WORDS[(i * 5 + 1) % WORDS.len()],
            WORDS[(i / WORDS.len()) % WORDS.len()],
        );
        let url = format!("/{}.html", name.replace("::", "/"));
        objects.push(
            DocObject::container(&name, &url)
                .with_description("<p>Provides the public interface of this component.</p>"),
        );

        for j in 0..4 {
            let member = MEMBERS[(i + j * 3) % MEMBERS.len()];
            objects.push(DocObject::member(&name, member, &format!("{}#{}", url, member)));
        }
    }
    objects
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for containers in [100, 1000] {
        let corpus = create_corpus(containers);
        group.bench_with_input(BenchmarkId::from_parameter(corpus.len()), &corpus, |b, corpus| {
            b.iter(|| build_search_index(black_box(corpus), &IndexConfig::default()))
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let index: SearchIndex = build_search_index(&create_corpus(2000), &IndexConfig::default());
    let queries = ["f", "fetch", "Cache#fetch", "HWIA", "controller_name", "ARM", "zzzz"];

    let mut group = c.benchmark_group("search");
    for query in queries {
        group.bench_with_input(BenchmarkId::from_parameter(query), query, |b, query| {
            let mut session = SearchSession::with_default_capacity(&index);
            b.iter(|| session.search(black_box(query)).len())
        });
    }
    group.finish();
}

/// Typing a query one character at a time, as the input box does
fn bench_keystrokes(c: &mut Criterion) {
    let index = build_search_index(&create_corpus(2000), &IndexConfig::default());
    let query = "ActiveSupport::Cache::Store#fetch";

    c.bench_function("keystrokes", |b| {
        let mut session = SearchSession::with_default_capacity(&index);
        b.iter(|| {
            let mut total = 0;
            for end in query.char_indices().map(|(i, c)| i + c.len_utf8()) {
                total += session.search(&query[..end]).len();
            }
            total
        })
    });
}

criterion_group!(benches, bench_build, bench_search, bench_keystrokes);
criterion_main!(benches);
