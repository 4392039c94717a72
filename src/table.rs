use std::borrow::Cow;
use std::io::Write;

use getset::{CopyGetters, Getters};

use crate::error::{Result, RowWarning};
use crate::record::{Record, TopEffect, VariantRecord};
use crate::types::{Value, FIXED_COLUMNS, NULL_REPR, TOP_EFFECT_COLUMNS};

/// A variant after INFO decoding and top-effect materialization.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct AnnotatedRow {
    #[getset(get_copy = "pub")]
    line: usize,
    chrom: String,
    pos: u64,
    #[getset(get = "pub")]
    id: Option<String>,
    ref_allele: String,
    alt_allele: String,
    #[getset(get = "pub")]
    qual: Option<String>,
    #[getset(get = "pub")]
    filter: Option<String>,
    /// Declared INFO fields, in schema order.
    #[getset(get = "pub")]
    info_fields: Vec<Option<Value>>,
    /// Raw annotation value; `"None"` when the variant was not annotated.
    #[getset(get = "pub")]
    annotation: String,
    #[getset(get = "pub")]
    top_effect: TopEffect,
    #[getset(get = "pub")]
    warnings: Vec<RowWarning>,
}

impl AnnotatedRow {
    pub fn new(
        record: VariantRecord,
        info_fields: Vec<Option<Value>>,
        annotation: String,
        top_effect: TopEffect,
        warnings: Vec<RowWarning>,
    ) -> Self {
        Self {
            line: record.line(),
            chrom: record.chrom().to_owned(),
            pos: record.pos(),
            id: record.id().clone(),
            ref_allele: record.ref_allele().to_owned(),
            alt_allele: record.alt_allele().to_owned(),
            qual: record.qual().clone(),
            filter: record.filter().clone(),
            info_fields,
            annotation,
            top_effect,
            warnings,
        }
    }

    /// Output cells in column order, nulls rendered as `NaN`.
    pub fn cells(&self) -> impl Iterator<Item = Cow<'_, str>> {
        fn nullable(value: &Option<String>) -> Cow<'_, str> {
            value.as_deref().unwrap_or(NULL_REPR).into()
        }
        let fixed = vec![
            Cow::Borrowed(self.chrom.as_str()),
            Cow::Owned(self.pos.to_string()),
            nullable(&self.id),
            Cow::Borrowed(self.ref_allele.as_str()),
            Cow::Borrowed(self.alt_allele.as_str()),
            nullable(&self.qual),
            nullable(&self.filter),
        ];
        let info = self.info_fields.iter().map(|value| match value {
            Some(Value::Text(s)) => Cow::Borrowed(s.as_str()),
            Some(value) => Cow::Owned(value.to_string()),
            None => Cow::Borrowed(NULL_REPR),
        });
        let effect = self
            .top_effect
            .columns()
            .iter()
            .map(|s| Cow::Borrowed(s.as_str()));
        fixed.into_iter().chain(info).chain(effect)
    }
}

impl Record for AnnotatedRow {
    fn chrom(&self) -> &str {
        &self.chrom
    }

    fn pos(&self) -> u64 {
        self.pos
    }

    fn ref_allele(&self) -> &str {
        &self.ref_allele
    }

    fn alt_allele(&self) -> &str {
        &self.alt_allele
    }
}

/// Rows sharing one column layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    info_columns: Vec<String>,
    rows: Vec<AnnotatedRow>,
}

impl Table {
    pub fn new(info_columns: Vec<String>, rows: Vec<AnnotatedRow>) -> Self {
        Self { info_columns, rows }
    }

    pub fn info_columns(&self) -> &[String] {
        &self.info_columns
    }

    pub fn rows(&self) -> &[AnnotatedRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<AnnotatedRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Same columns, different rows.
    pub fn with_rows(&self, rows: Vec<AnnotatedRow>) -> Self {
        Self {
            info_columns: self.info_columns.clone(),
            rows,
        }
    }

    pub fn map_rows<F>(self, f: F) -> Self
    where
        F: FnOnce(Vec<AnnotatedRow>) -> Vec<AnnotatedRow>,
    {
        let Table { info_columns, rows } = self;
        Self {
            info_columns,
            rows: f(rows),
        }
    }

    pub fn header(&self) -> impl Iterator<Item = &str> {
        FIXED_COLUMNS
            .iter()
            .copied()
            .chain(self.info_columns.iter().map(String::as_str))
            .chain(TOP_EFFECT_COLUMNS.iter().copied())
    }

    /// Write the table as TSV with a header line.
    pub fn write_tsv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);
        writer.write_record(self.header())?;
        for row in &self.rows {
            writer.write_record(row.cells().map(|cell| cell.into_owned()))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_tsv(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_tsv(&mut buffer)?;
        Ok(buffer)
    }
}
