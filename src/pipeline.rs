use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use log::{debug, info, warn};
use tempfile::NamedTempFile;

use crate::decode::{annotation_value, decode_annotation, decode_info, project_fields};
use crate::error::{Result, RowWarning};
use crate::record::VariantRecord;
use crate::select::{
    dedup_by_identity, drop_unannotated, filter_by_gene, materialize_top_effect,
    select_top_effect,
};
use crate::table::{AnnotatedRow, Table};
use crate::types::{InfoMap, InfoSchema, DEFAULT_ANNOTATION_KEY, NONE_SENTINEL};

/// Decoding and filtering settings for one run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    schema: InfoSchema,
    annotation_key: String,
    genes: BTreeSet<String>,
}

/// The two tables a run produces; the panel table is a row subset of the genome-wide one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub genome_wide: Table,
    pub gene_panel: Table,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(InfoSchema::clinvar())
    }
}

impl Pipeline {
    pub fn new(schema: InfoSchema) -> Self {
        Self {
            schema,
            annotation_key: DEFAULT_ANNOTATION_KEY.to_owned(),
            genes: BTreeSet::new(),
        }
    }

    pub fn with_annotation_key<S: Into<String>>(mut self, key: S) -> Self {
        self.annotation_key = key.into();
        self
    }

    pub fn with_genes<I, S>(mut self, genes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genes = genes.into_iter().map(Into::into).collect();
        self
    }

    pub fn genes(&self) -> &BTreeSet<String> {
        &self.genes
    }

    /// Declared fields that become output columns. The annotation field itself never does.
    pub fn output_schema(&self) -> InfoSchema {
        self.schema.without(&self.annotation_key)
    }

    /// Decode one record and materialize its top effect.
    ///
    /// Only type-coercion failures are returned as errors; everything else ends up as a
    /// [`RowWarning`] on the row.
    pub fn annotate(
        &self,
        record: VariantRecord,
        output_schema: &InfoSchema,
    ) -> Result<AnnotatedRow> {
        let mut warnings = Vec::new();
        let (info_fields, annotation, effects) = {
            let info = match decode_info(record.info_raw()) {
                Ok(info) => info,
                Err(e) if e.is_recoverable() => {
                    warnings.push(RowWarning::MalformedInfo);
                    InfoMap::new()
                }
                Err(e) => return Err(e),
            };
            let info_fields = project_fields(&info, output_schema.fields(), record.line())?;
            let annotation = annotation_value(&info, &self.annotation_key);
            let effects = if annotation == NONE_SENTINEL {
                Vec::new()
            } else {
                decode_annotation(annotation)
            };
            (info_fields, annotation.to_owned(), effects)
        };

        if effects.is_empty() && annotation != NONE_SENTINEL {
            warnings.push(RowWarning::EmptyAnnotation);
        }
        warnings.extend(
            effects
                .iter()
                .enumerate()
                .filter(|(_, effect)| effect.is_malformed())
                .map(|(index, effect)| RowWarning::MalformedEffect {
                    index,
                    found: effect.attributes().len(),
                }),
        );
        let top_effect = materialize_top_effect(&select_top_effect(&effects));

        for warning in &warnings {
            warn!("line {}: {}", record.line(), warning);
        }
        Ok(AnnotatedRow::new(
            record,
            info_fields,
            annotation,
            top_effect,
            warnings,
        ))
    }

    /// Run the whole pipeline over `records`. Any error aborts the run before output exists.
    pub fn run<I>(&self, records: I) -> Result<PipelineOutput>
    where
        I: IntoIterator<Item = Result<VariantRecord>>,
    {
        let output_schema = self.output_schema();
        let rows = records
            .into_iter()
            .map(|record| record.and_then(|record| self.annotate(record, &output_schema)))
            .collect::<Result<Vec<_>>>()?;
        let columns = output_schema.fields().map(|f| f.key.to_owned()).collect();
        let table = Table::new(columns, rows);
        let read = table.len();

        let table = drop_unannotated(table);
        let annotated = table.len();
        let genome_wide = dedup_by_identity(table);
        debug!(
            "{} records read, {} without annotation, {} duplicates",
            read,
            read - annotated,
            annotated - genome_wide.len()
        );

        let gene_panel = filter_by_gene(&genome_wide, &self.genes);
        info!(
            "{} variants genome-wide, {} in the {}-gene panel",
            genome_wide.len(),
            gene_panel.len(),
            self.genes.len()
        );
        Ok(PipelineOutput {
            genome_wide,
            gene_panel,
        })
    }
}

impl PipelineOutput {
    /// Write both tables, or neither.
    ///
    /// Each table goes to a temporary file beside its destination; the temporary files
    /// are only renamed into place once both have been written completely.
    pub fn write<P, Q>(&self, genome_wide: P, gene_panel: Q) -> Result<()>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let (genome_wide, gene_panel) = (genome_wide.as_ref(), gene_panel.as_ref());
        let genome_wide_tmp = stage(&self.genome_wide, genome_wide)?;
        let gene_panel_tmp = stage(&self.gene_panel, gene_panel)?;

        genome_wide_tmp.persist(genome_wide).map_err(|e| e.error)?;
        if let Err(e) = gene_panel_tmp.persist(gene_panel) {
            fs::remove_file(genome_wide)?;
            return Err(e.error.into());
        }
        info!(
            "wrote {} and {}",
            genome_wide.display(),
            gene_panel.display()
        );
        Ok(())
    }
}

/// Render `table` into a temporary file in the directory of `destination`.
fn stage(table: &Table, destination: &Path) -> Result<NamedTempFile> {
    let dir = match destination.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&table.to_tsv()?)?;
    file.flush()?;
    Ok(file)
}
