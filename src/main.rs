use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use vcf_topeffect::panel::{parse_gene_list, read_bed_genes};
use vcf_topeffect::{InfoSchema, Pipeline, VariantRecords};

/// Extract SnpEff top effects from an annotated VCF into genome-wide and gene-panel TSV tables.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// VCF file prefix; input defaults to <PREFIX>.vcf.
    #[arg(short, long, default_value = "clinvar_20231015.ann")]
    prefix: String,

    /// Input VCF (plain or gzipped), overrides the prefix.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// BED file whose 4th column names the panel genes (suffixes after '_' are stripped).
    #[arg(short = 'b', long)]
    panel_bed: Vec<PathBuf>,

    /// Additional panel gene symbols; may be repeated or comma-separated.
    #[arg(short, long)]
    gene: Vec<String>,

    /// INFO fields to keep as columns, as KEY=TYPE with TYPE one of str, int.
    /// Defaults to the ClinVar fields.
    #[arg(long = "info", value_name = "KEY=TYPE")]
    info: Vec<String>,

    /// INFO key holding the SnpEff effects.
    #[arg(long, default_value = "ANN")]
    annotation_key: String,

    /// Genome-wide output, defaults to <PREFIX>_parsed_genomewide.tsv.
    #[arg(long)]
    genome_wide_output: Option<PathBuf>,

    /// Gene-panel output, defaults to <PREFIX>_parsed_genepanel.tsv.
    #[arg(long)]
    panel_output: Option<PathBuf>,

    /// Log debug messages.
    #[arg(short, long)]
    verbose: bool,
}

fn schema(declarations: &[String]) -> Result<InfoSchema> {
    if declarations.is_empty() {
        return Ok(InfoSchema::clinvar());
    }
    Ok(declarations.join(",").parse::<InfoSchema>()?)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut genes = BTreeSet::new();
    for bed in &args.panel_bed {
        genes.extend(
            read_bed_genes(bed).with_context(|| format!("reading panel {}", bed.display()))?,
        );
    }
    genes.extend(args.gene.iter().flat_map(|g| parse_gene_list(g)));
    info!("{} genes in panel: {:?}", genes.len(), genes);

    let input = args
        .input
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.vcf", args.prefix)));
    let genome_wide = args
        .genome_wide_output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}_parsed_genomewide.tsv", args.prefix)));
    let panel = args
        .panel_output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}_parsed_genepanel.tsv", args.prefix)));

    let pipeline = Pipeline::new(schema(&args.info)?)
        .with_annotation_key(args.annotation_key.as_str())
        .with_genes(genes);
    let records = VariantRecords::from_path(&input)
        .with_context(|| format!("opening {}", input.display()))?;
    let output = pipeline
        .run(records)
        .with_context(|| format!("processing {}", input.display()))?;
    output.write(&genome_wide, &panel)?;
    Ok(())
}
