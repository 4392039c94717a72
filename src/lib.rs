//! Flatten SnpEff-annotated VCF files into TSV tables holding one "top effect" per variant.
//!
//! The top effect is the first effect in a variant's `ANN` value; SnpEff orders effects
//! by significance, and that order is taken as given. Rows are deduplicated on
//! `(CHROM, POS, REF, ALT)` and optionally restricted to a gene panel.
//!
//! ```no_run
//! use vcf_topeffect::{Pipeline, VariantRecords};
//!
//! let records = VariantRecords::from_path("clinvar.ann.vcf")?;
//! let output = Pipeline::default()
//!     .with_genes(vec!["BRCA1", "TP53"])
//!     .run(records)?;
//! output.write("genomewide.tsv", "panel.tsv")?;
//! # Ok::<(), vcf_topeffect::Error>(())
//! ```

pub mod decode;
pub mod error;
pub mod panel;
pub(crate) mod parser;
pub mod pipeline;
pub mod reader;
pub mod record;
pub mod select;
pub mod table;
pub mod types;

pub use error::{Error, Result, RowWarning};
pub use pipeline::{Pipeline, PipelineOutput};
pub use reader::VariantRecords;
pub use record::{EffectRecord, Record, TopEffect, VariantRecord};
pub use table::{AnnotatedRow, Table};
pub use types::{FieldType, InfoSchema};
