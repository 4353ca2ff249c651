use crate::index::types::SearchIndex;
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Prefix of the JavaScript module form of the index
pub const JS_MODULE_PREFIX: &str = "export default ";

/// On-disk representation of the search index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum IndexFormat {
    /// Plain JSON document
    #[default]
    Json,
    /// ES module with the index as its default export
    Js,
}

impl IndexFormat {
    /// Guess the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("js" | "mjs") => IndexFormat::Js,
            _ => IndexFormat::Json,
        }
    }
}

/// Serialize an index in the given format.
pub fn encode_index<W: Write>(index: &SearchIndex, format: IndexFormat, mut out: W) -> Result<()> {
    if format == IndexFormat::Js {
        out.write_all(JS_MODULE_PREFIX.as_bytes())?;
    }

    serde_json::to_writer(&mut out, index).context("Failed to serialize search index")?;

    if format == IndexFormat::Js {
        out.write_all(b";")?;
    }
    out.write_all(b"\n")?;

    Ok(())
}

/// Write an index to `path`, creating parent directories as needed.
pub fn write_index(index: &SearchIndex, path: &Path, format: IndexFormat) -> Result<u64> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create index file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    encode_index(index, format, &mut writer)?;
    writer.flush()?;

    let size = fs::metadata(path)?.len();
    tracing::info!(bytes = size, ?format, "Wrote search index to {}", path.display());

    Ok(size)
}
