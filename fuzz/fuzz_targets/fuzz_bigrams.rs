#![no_main]

use docsift::index::compile::compile_bigrams;
use docsift::index::fingerprint::generate_fingerprint;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (String, Option<String>)| {
    // Every derived bigram must land in the fingerprint built from its own table
    let (name, member) = input;
    let bigrams = docsift::utils::derive_bigrams(&name, member.as_deref());
    let table = compile_bigrams(&[bigrams.clone()]);
    let fingerprint = generate_fingerprint(&bigrams, &table);

    for bigram in &bigrams {
        let position = table.position(bigram).expect("bigram missing from table");
        assert!(fingerprint.contains(position));
    }
    assert_eq!(fingerprint.positions().count(), table.len());
});
