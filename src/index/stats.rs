use crate::index::reader::read_index;
use crate::index::types::{SearchIndex, Weight};
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// Summary figures of a compiled index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexStats {
    pub entries: usize,
    pub containers: usize,
    pub members: usize,
    pub bigrams: usize,
    pub mean_fingerprint_bytes: f64,
    pub max_fingerprint_bytes: usize,
    /// Number of bit positions per weight
    pub weight_classes: BTreeMap<Weight, usize>,
}

impl IndexStats {
    pub fn collect(index: &SearchIndex) -> Self {
        let members = index.entries.iter().filter(|e| e.is_member()).count();
        let total_bytes: usize = index.entries.iter().map(|e| e.fingerprint.len()).sum();

        let mut weight_classes = BTreeMap::new();
        for &weight in &index.weights {
            *weight_classes.entry(weight).or_insert(0) += 1;
        }

        Self {
            entries: index.entries.len(),
            containers: index.entries.len() - members,
            members,
            bigrams: index.bigrams.len(),
            mean_fingerprint_bytes: if index.entries.is_empty() {
                0.0
            } else {
                total_bytes as f64 / index.entries.len() as f64
            },
            max_fingerprint_bytes: index
                .entries
                .iter()
                .map(|e| e.fingerprint.len())
                .max()
                .unwrap_or(0),
            weight_classes,
        }
    }
}

/// Display index statistics
pub fn show_stats(index_path: &Path) -> Result<()> {
    let index = read_index(index_path)?;
    let stats = IndexStats::collect(&index);

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Index location:   {}", index_path.display());
    if let Ok(meta) = std::fs::metadata(index_path) {
        println!("Index size:       {}", format_size(meta.len()));
    }
    println!("Entries:          {}", stats.entries);
    println!("  Containers:     {}", stats.containers);
    println!("  Members:        {}", stats.members);
    println!("Bigrams:          {}", stats.bigrams);
    println!(
        "Fingerprints:     {:.1} bytes mean, {} bytes max",
        stats.mean_fingerprint_bytes, stats.max_fingerprint_bytes
    );

    println!();
    println!("Bit positions by weight:");
    for (weight, count) in stats.weight_classes.iter().rev() {
        println!("  {:>4}  {}", weight, count);
    }

    Ok(())
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
