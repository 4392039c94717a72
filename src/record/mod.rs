mod effect;

use getset::{CopyGetters, Getters};

use crate::error::{Error, Result};
use crate::parser;
use crate::types::VCF_FIELD_COUNT;
pub use effect::{EffectRecord, TopEffect};

/// Accessors shared by everything that carries the fixed VCF columns.
pub trait Record {
    fn chrom(&self) -> &str;

    /// 1-based position, i.e. POS.
    fn pos(&self) -> u64;

    fn ref_allele(&self) -> &str;

    fn alt_allele(&self) -> &str;

    /// The `(CHROM, POS, REF, ALT)` key duplicates are detected by.
    fn identity(&self) -> IdentityKey<'_> {
        IdentityKey {
            chrom: self.chrom(),
            pos: self.pos(),
            ref_allele: self.ref_allele(),
            alt_allele: self.alt_allele(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey<'a> {
    pub chrom: &'a str,
    pub pos: u64,
    pub ref_allele: &'a str,
    pub alt_allele: &'a str,
}

/// One data line of the input, with INFO kept undecoded.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct VariantRecord {
    /// 1-based line number in the input file.
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
    #[getset(get = "pub")]
    info_raw: String,
}

impl VariantRecord {
    /// Parse one tab-separated data line. CHROM is always kept as text.
    ///
    /// Empty ID, QUAL and FILTER columns become null; anything else (including `.`) is kept
    /// verbatim. REF and ALT are part of the variant identity and always stay text.
    pub fn parse(line: usize, text: &str) -> Result<Self> {
        let (_, columns) = parser::columns(text).map_err(|_| Error::Format {
            line,
            expected: VCF_FIELD_COUNT,
            found: 0,
        })?;
        if columns.len() != VCF_FIELD_COUNT {
            return Err(Error::Format {
                line,
                expected: VCF_FIELD_COUNT,
                found: columns.len(),
            });
        }
        let pos = columns[1]
            .parse::<u64>()
            .ok()
            .filter(|&p| p > 0)
            .ok_or_else(|| Error::InvalidPosition {
                line,
                value: columns[1].to_owned(),
            })?;
        let nullable = |s: &str| {
            if s.is_empty() {
                None
            } else {
                Some(s.to_owned())
            }
        };
        Ok(Self {
            line,
            chrom: columns[0].to_owned(),
            pos,
            id: nullable(columns[2]),
            ref_allele: columns[3].to_owned(),
            alt_allele: columns[4].to_owned(),
            qual: nullable(columns[5]),
            filter: nullable(columns[6]),
            info_raw: columns[7].to_owned(),
        })
    }
}

impl Record for VariantRecord {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let record =
            VariantRecord::parse(3, "X\t100\trs1\tA\tT\t\tPASS\tALLELEID=5;ANN=T|x").unwrap();
        assert_eq!(record.chrom(), "X");
        assert_eq!(record.pos(), 100);
        assert_eq!(record.id().as_deref(), Some("rs1"));
        assert_eq!(record.ref_allele(), "A");
        assert_eq!(record.alt_allele(), "T");
        assert_eq!(record.qual(), &None);
        assert_eq!(record.filter().as_deref(), Some("PASS"));
        assert_eq!(record.info_raw(), "ALLELEID=5;ANN=T|x");
        assert_eq!(record.line(), 3);
    }

    #[test]
    fn test_chrom_stays_text() {
        let record = VariantRecord::parse(1, "01\t5\t.\tA\tT\t.\t.\tDB").unwrap();
        assert_eq!(record.chrom(), "01");
        assert_eq!(record.id().as_deref(), Some("."));
    }

    #[test]
    fn test_empty_optional_columns_are_null() {
        let record = VariantRecord::parse(1, "1\t5\t\tA\tT\t\t\tDB").unwrap();
        assert_eq!(record.id(), &None);
        assert_eq!(record.qual(), &None);
        assert_eq!(record.filter(), &None);
    }

    #[test]
    fn test_wrong_field_count() {
        let err = VariantRecord::parse(7, "1\t5\t.\tA\tT\t.\t.").unwrap_err();
        assert!(matches!(
            err,
            Error::Format {
                line: 7,
                expected: 8,
                found: 7
            }
        ));
        let err = VariantRecord::parse(8, "1\t5\t.\tA\tT\t.\t.\tDB\textra").unwrap_err();
        assert!(matches!(err, Error::Format { found: 9, .. }));
    }

    #[test]
    fn test_invalid_position() {
        let err = VariantRecord::parse(2, "1\tfive\t.\tA\tT\t.\t.\tDB").unwrap_err();
        assert!(matches!(err, Error::InvalidPosition { line: 2, .. }));
        assert!(VariantRecord::parse(2, "1\t0\t.\tA\tT\t.\t.\tDB").is_err());
    }

    #[test]
    fn test_identity() {
        let a = VariantRecord::parse(1, "1\t5\tx\tA\tT\t.\t.\tDB").unwrap();
        let b = VariantRecord::parse(2, "1\t5\ty\tA\tT\t9\tq\tAF=1").unwrap();
        let c = VariantRecord::parse(3, "1\t5\tx\tA\tC\t.\t.\tDB").unwrap();
        assert_eq!(a.identity(), b.identity());
        assert_ne!(a.identity(), c.identity());
    }
}
