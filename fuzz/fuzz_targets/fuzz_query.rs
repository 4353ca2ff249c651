#![no_main]

use docsift::index::{build_search_index, DocObject, IndexConfig};
use docsift::query::SearchSession;
use libfuzzer_sys::fuzz_target;
use std::sync::LazyLock;

static INDEX: LazyLock<docsift::index::SearchIndex> = LazyLock::new(|| {
    let corpus = vec![
        DocObject::container("ActiveSupport::Cache::Store", "/Store.html"),
        DocObject::member("ActiveSupport::Cache::Store", "fetch", "/Store.html#fetch"),
        DocObject::member("ActionController::Metal", "controller_name", "/Metal.html#name"),
        DocObject::container("ActiveSupport::HashWithIndifferentAccess", "/HWIA.html"),
    ];
    build_search_index(&corpus, &IndexConfig::default())
});

fuzz_target!(|query: &str| {
    let mut session = SearchSession::new(&INDEX, 3);
    let hits = session.search(query);

    assert!(hits.len() <= 3);
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(hits.iter().all(|h| h.score > 0.0));
});
