use crate::index::compile::{compile_bigrams, compute_bit_weights};
use crate::index::fingerprint::{generate_fingerprint, tiebreaker_bonus};
use crate::index::types::{BigramTable, DocKind, DocObject, Entry, IndexConfig, SearchIndex};
use crate::index::writer::{write_index, IndexFormat};
use crate::utils::{derive_bigrams, truncate_description, Bigram, Spinner};
use ahash::AHashSet;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read a corpus of documentable objects (a JSON array).
pub fn read_corpus(path: &Path) -> Result<Vec<DocObject>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus {}", path.display()))?;
    let objects: Vec<DocObject> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse corpus {}", path.display()))?;
    Ok(objects)
}

/// Compile a search index from an ordered corpus.
///
/// Objects repeated with the same full name and url (aliased modules
/// duplicate their members) are indexed once. The output only depends on
/// the corpus order and content.
pub fn build_search_index(objects: &[DocObject], config: &IndexConfig) -> SearchIndex {
    let objects = dedupe(objects);

    let bigram_sets: Vec<Vec<Bigram>> = objects
        .iter()
        .map(|object| derive_bigrams(&object.full_name(), bare_member_name(object)))
        .collect();

    let bigrams = compile_bigrams(&bigram_sets);
    let weights = compute_bit_weights(&bigrams);

    let entries: Vec<Entry> = objects
        .iter()
        .zip(&bigram_sets)
        .map(|(object, set)| build_entry(object, set, &bigrams, config))
        .collect();

    tracing::info!(
        entries = entries.len(),
        bigrams = bigrams.len(),
        "Compiled search index"
    );

    SearchIndex {
        bigrams,
        weights,
        entries,
    }
}

fn build_entry(
    object: &DocObject,
    bigrams: &[Bigram],
    table: &BigramTable,
    config: &IndexConfig,
) -> Entry {
    let full_name = object.full_name();

    Entry {
        fingerprint: generate_fingerprint(bigrams, table),
        tiebreaker_bonus: tiebreaker_bonus(&full_name, bare_member_name(object)),
        url: object.url.clone(),
        owner_name: object.owner_name().to_string(),
        member_name: object.member_display_name(),
        summary: object
            .description
            .as_deref()
            .and_then(|d| truncate_description(d, config.summary_limit)),
    }
}

fn bare_member_name(object: &DocObject) -> Option<&str> {
    match object.kind {
        DocKind::Member { .. } => Some(&object.name),
        DocKind::Container => None,
    }
}

fn dedupe(objects: &[DocObject]) -> Vec<&DocObject> {
    let mut seen = AHashSet::with_capacity(objects.len());
    let unique: Vec<&DocObject> = objects
        .iter()
        .filter(|object| seen.insert((object.full_name(), object.url.as_str())))
        .collect();

    if unique.len() < objects.len() {
        tracing::debug!(
            duplicates = objects.len() - unique.len(),
            "Skipped duplicate documentable objects"
        );
    }

    unique
}

/// Build the index for a corpus file and write it to `output`.
pub fn build_index_file(
    corpus_path: &Path,
    output: &Path,
    format: IndexFormat,
    config: &IndexConfig,
    silent: bool,
) -> Result<SearchIndex> {
    if !silent {
        println!("Indexing: {}", corpus_path.display());
    }

    let spinner = (!silent).then(|| Spinner::start("Reading corpus..."));
    let objects = read_corpus(corpus_path)?;
    if let Some(spinner) = spinner {
        spinner.finish(format!("Read {} documentable objects", objects.len()));
    }

    let spinner = (!silent).then(|| Spinner::start("Compiling bigram fingerprints..."));
    let index = build_search_index(&objects, config);
    if let Some(spinner) = spinner {
        spinner.finish(format!(
            "Compiled {} entries over {} bigrams",
            index.entries.len(),
            index.bigrams.len()
        ));
    }

    let size = write_index(&index, output, format)?;

    if !silent {
        println!("Index stored at: {} ({} bytes)", output.display(), size);
    }

    Ok(index)
}
