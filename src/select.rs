//! Top-effect selection and the row filters applied to the annotated table.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::convert::TryInto;

use itertools::Itertools;

use crate::record::{EffectRecord, Record, TopEffect};
use crate::table::Table;
use crate::types::{ANN_FIELD_COUNT, NONE_SENTINEL};

/// The canonical effect of a variant: the first one the annotator reported.
///
/// Effects are never re-ranked here. An empty sequence yields the all-empty marker.
pub fn select_top_effect(effects: &[EffectRecord]) -> Cow<'_, EffectRecord> {
    match effects.first() {
        Some(effect) => Cow::Borrowed(effect),
        None => Cow::Owned(EffectRecord::empty()),
    }
}

/// Spread an effect over the 16 `TopEffect*` columns.
///
/// A malformed effect degrades to an all-blank row instead of failing.
pub fn materialize_top_effect(effect: &EffectRecord) -> TopEffect {
    let columns: Option<[String; ANN_FIELD_COUNT]> = effect.attributes().to_vec().try_into().ok();
    columns.map(TopEffect::from).unwrap_or_else(TopEffect::blank)
}

/// Remove variants whose raw annotation is exactly `"None"`.
pub fn drop_unannotated(table: Table) -> Table {
    table.map_rows(|rows| {
        rows.into_iter()
            .filter(|row| row.annotation() != NONE_SENTINEL)
            .collect()
    })
}

/// Keep the first row for every `(CHROM, POS, REF, ALT)`, preserving input order.
pub fn dedup_by_identity(table: Table) -> Table {
    table.map_rows(dedup_rows)
}

/// Row-level form of [`dedup_by_identity`] for anything carrying VCF coordinates.
pub fn dedup_rows<T: Record>(rows: Vec<T>) -> Vec<T> {
    rows.into_iter()
        .unique_by(|row| {
            (
                row.chrom().to_owned(),
                row.pos(),
                row.ref_allele().to_owned(),
                row.alt_allele().to_owned(),
            )
        })
        .collect()
}

/// Rows whose top-effect gene name is exactly one of `genes`.
///
/// This is a set membership test, so symbols containing `.`, `|` and the like match
/// only themselves. Rows with a blank gene name never match.
pub fn filter_by_gene(table: &Table, genes: &BTreeSet<String>) -> Table {
    let rows = table
        .rows()
        .iter()
        .filter(|row| {
            let gene = row.top_effect().gene_name();
            !gene.is_empty() && genes.contains(gene)
        })
        .cloned()
        .collect();
    table.with_rows(rows)
}
