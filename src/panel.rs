//! Gene panel construction from BED target files and literal symbol lists.

use std::collections::BTreeSet;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

const BED_NAME_COLUMN: usize = 3;

/// Strip a target suffix from a BED name: `BRCA1_exon2` becomes `BRCA1`.
///
/// Everything from the first `_` is dropped, unless the `_` is the last character.
pub fn gene_symbol(name: &str) -> &str {
    match name.find('_') {
        Some(i) if i + 1 < name.len() => &name[..i],
        _ => name,
    }
}

/// Read the gene symbols named in column 4 of a (possibly gzipped) BED file.
pub fn read_bed_genes<P: AsRef<Path>>(path: P) -> Result<BTreeSet<String>> {
    let (reader, _format) = niffler::from_path(path.as_ref())?;
    let genes = bed_genes(BufReader::new(reader))?;
    log::debug!(
        "{} gene symbols in {}",
        genes.len(),
        path.as_ref().display()
    );
    Ok(genes)
}

pub fn bed_genes<R: BufRead>(reader: R) -> Result<BTreeSet<String>> {
    let mut genes = BTreeSet::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty()
            || line.starts_with('#')
            || line.starts_with("track")
            || line.starts_with("browser")
        {
            continue;
        }
        let columns: Vec<&str> = line.split('\t').collect();
        let name = columns.get(BED_NAME_COLUMN).ok_or(Error::Format {
            line: i + 1,
            expected: BED_NAME_COLUMN + 1,
            found: columns.len(),
        })?;
        genes.insert(gene_symbol(name).to_owned());
    }
    Ok(genes)
}

/// Split comma-separated symbols, ignoring surrounding whitespace and empty entries.
pub fn parse_gene_list(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
