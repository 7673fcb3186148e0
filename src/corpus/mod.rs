//! Corpus loading
//!
//! State of the Union addresses ship as a tab-delimited file with no header:
//! `year<TAB>president<TAB>address text`. Any further columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::{Result, TagFreqError};
use crate::types::DocumentRecord;

/// Read every address from a tab-delimited file.
pub fn read_addresses<P: AsRef<Path>>(path: P) -> Result<Vec<DocumentRecord>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(TagFreqError::CorpusNotFound(path.to_path_buf()));
    }
    let records = read_addresses_from(File::open(path)?)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(path = %path.display(), documents = records.len(), "corpus loaded");

    Ok(records)
}

/// Read addresses from any reader.
///
/// Quoting is disabled: speech text routinely contains `"` characters that
/// are part of the text, not field delimiters.
pub fn read_addresses_from<R: Read>(reader: R) -> Result<Vec<DocumentRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 1);

        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if row.len() < 3 {
            return Err(TagFreqError::MalformedRecord {
                line,
                reason: format!("expected 3 tab-separated fields, found {}", row.len()),
            });
        }

        let year_field = row[0].trim();
        let year: i32 = year_field.parse().map_err(|_| TagFreqError::MalformedRecord {
            line,
            reason: format!("year {year_field:?} is not an integer"),
        })?;

        records.push(DocumentRecord::new(year, row[1].trim(), &row[2]));
    }

    Ok(records)
}

/// Documents written by `author`, in corpus order.
pub fn by_author<'a>(
    records: &'a [DocumentRecord],
    author: &'a str,
) -> impl Iterator<Item = &'a DocumentRecord> + 'a {
    records.iter().filter(move |r| r.author == author)
}

/// Distinct authors in order of first appearance.
pub fn authors(records: &[DocumentRecord]) -> Vec<&str> {
    let mut seen = rustc_hash::FxHashSet::default();
    records
        .iter()
        .map(|r| r.author.as_str())
        .filter(|a| seen.insert(*a))
        .collect()
}
