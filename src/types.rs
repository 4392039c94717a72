use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use itertools::Itertools;
use strum::{Display, EnumString};

use crate::error::{Error, Result};

/// Number of positional columns in a VCF data line (CHROM through INFO).
pub const VCF_FIELD_COUNT: usize = 8;

/// Number of `|`-separated sub-attributes of a single SnpEff effect.
pub const ANN_FIELD_COUNT: usize = 16;

/// Raw annotation value of a variant that SnpEff left unannotated.
pub const NONE_SENTINEL: &str = "None";

/// Text written for null cells.
pub const NULL_REPR: &str = "NaN";

pub const DEFAULT_ANNOTATION_KEY: &str = "ANN";

/// Output columns taken over from the VCF line (everything but INFO).
pub const FIXED_COLUMNS: [&str; 7] = ["CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER"];

/// Output columns for the materialized top effect, in ANN sub-attribute order.
pub const TOP_EFFECT_COLUMNS: [&str; ANN_FIELD_COUNT] = [
    "TopEffectAllele",
    "TopEffectAnnotation",
    "TopEffectImpact",
    "TopEffectGeneName",
    "TopEffectGeneId",
    "TopEffectFeatureType",
    "TopEffectFeatureId",
    "TopEffectTranscriptBiotype",
    "TopEffectExonIntronRankTotal",
    "TopEffectHGVSc",
    "TopEffectHGVSp",
    "TopEffectcDNAposcDNAlen",
    "TopEffectCDSposCDSlen",
    "TopEffectProteinposProteinlen",
    "TopEffectDistanceToFeature",
    "TopEffectInfo",
];

/// Index of the gene name within an effect (and within `TOP_EFFECT_COLUMNS`).
pub const GENE_NAME_INDEX: usize = 3;

/// Target type of a declared INFO field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum FieldType {
    #[strum(to_string = "text", serialize = "str", serialize = "string")]
    Text,
    #[strum(to_string = "integer", serialize = "int")]
    Integer,
}

/// A typed INFO value after projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Integer(i64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
        }
    }
}

/// Value side of an INFO entry: `KEY=value` or a bare `KEY` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoValue<'a> {
    Flag,
    Value(&'a str),
}

impl<'a> InfoValue<'a> {
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            InfoValue::Flag => None,
            InfoValue::Value(v) => Some(v),
        }
    }
}

/// Decoded INFO column, in input order. A repeated key keeps its first position and last value.
pub type InfoMap<'a> = IndexMap<&'a str, InfoValue<'a>>;

/// A (key, target type) pair lifted to a top-level output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredInfoField<'a> {
    pub key: &'a str,
    pub kind: FieldType,
}

/// Ordered set of declared INFO fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoSchema {
    fields: IndexMap<String, FieldType>,
}

impl InfoSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ClinVar field set used for SnpEff-annotated ClinVar releases.
    pub fn clinvar() -> Self {
        let mut schema = Self::new().with_field("ALLELEID", FieldType::Integer);
        for key in &[
            "CLNDISDB",
            "CLNDN",
            "CLNHGVS",
            "CLNREVSTAT",
            "CLNSIG",
            "CLNVC",
            "CLNVCSO",
            "GENEINFO",
            "MC",
            "ORIGIN",
            DEFAULT_ANNOTATION_KEY,
        ] {
            schema = schema.with_field(*key, FieldType::Text);
        }
        schema
    }

    /// Add (or retype) a field. A retyped field keeps its original position.
    pub fn with_field<K: Into<String>>(mut self, key: K, kind: FieldType) -> Self {
        self.fields.insert(key.into(), kind);
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn fields(&self) -> impl Iterator<Item = DeclaredInfoField<'_>> + Clone {
        self.fields
            .iter()
            .map(|(key, &kind)| DeclaredInfoField { key, kind })
    }

    /// Schema without `key`, order otherwise preserved.
    pub fn without(&self, key: &str) -> Self {
        let mut fields = self.fields.clone();
        fields.shift_remove(key);
        Self { fields }
    }
}

impl FromStr for InfoSchema {
    type Err = Error;

    /// Parses `KEY=TYPE[,KEY=TYPE...]`.
    fn from_str(s: &str) -> Result<Self> {
        s.split(',')
            .filter(|entry| !entry.trim().is_empty())
            .map(parse_declaration)
            .fold_ok(InfoSchema::new(), |schema, (key, kind)| {
                schema.with_field(key, kind)
            })
    }
}

fn parse_declaration(entry: &str) -> Result<(String, FieldType)> {
    let (key, kind) = entry
        .trim()
        .split_once('=')
        .ok_or_else(|| Error::Config(format!("expected KEY=TYPE, got {:?}", entry)))?;
    if key.is_empty() {
        return Err(Error::Config(format!("empty key in {:?}", entry)));
    }
    let kind = FieldType::from_str(kind)
        .map_err(|_| Error::Config(format!("unknown type {:?} for INFO field {}", kind, key)))?;
    Ok((key.to_owned(), kind))
}
