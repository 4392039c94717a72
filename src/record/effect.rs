use crate::types::{ANN_FIELD_COUNT, GENE_NAME_INDEX};

/// One `|`-separated effect of an ANN value, kept as decoded.
///
/// A record whose attribute count differs from 16 is malformed. It stays in its
/// sequence so that the effect order produced by the annotator is never shifted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectRecord {
    attributes: Vec<String>,
}

impl EffectRecord {
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    /// The empty marker: 16 empty sub-attributes.
    pub fn empty() -> Self {
        Self {
            attributes: vec![String::new(); ANN_FIELD_COUNT],
        }
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn is_malformed(&self) -> bool {
        self.attributes.len() != ANN_FIELD_COUNT
    }

    pub fn gene_name(&self) -> Option<&str> {
        if self.is_malformed() {
            None
        } else {
            Some(&self.attributes[GENE_NAME_INDEX])
        }
    }
}

/// The 16 `TopEffect*` columns of a variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopEffect([String; ANN_FIELD_COUNT]);

impl TopEffect {
    /// All columns empty; used for malformed or missing top effects.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[String; ANN_FIELD_COUNT] {
        &self.0
    }

    pub fn allele(&self) -> &str {
        &self.0[0]
    }

    pub fn annotation(&self) -> &str {
        &self.0[1]
    }

    pub fn impact(&self) -> &str {
        &self.0[2]
    }

    pub fn gene_name(&self) -> &str {
        &self.0[GENE_NAME_INDEX]
    }

    pub fn is_blank(&self) -> bool {
        self.0.iter().all(String::is_empty)
    }
}

impl From<[String; ANN_FIELD_COUNT]> for TopEffect {
    fn from(columns: [String; ANN_FIELD_COUNT]) -> Self {
        Self(columns)
    }
}
