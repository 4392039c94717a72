use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::Result;
use crate::record::VariantRecord;

const COMMENT_PREFIX: char = '#';

/// Iterator over the data lines of a VCF-like text file.
///
/// Header/comment lines (`#...`) and blank lines are skipped. The first error ends the iteration.
pub struct VariantRecords<R: BufRead> {
    inner: R,
    buffer: String,
    line: usize,
    done: bool,
}

impl VariantRecords<BufReader<Box<dyn Read>>> {
    /// Open a plain or gzip-compressed file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (reader, format) = niffler::from_path(path.as_ref())?;
        log::debug!(
            "reading variants from {} ({:?})",
            path.as_ref().display(),
            format
        );
        Ok(Self::new(BufReader::new(reader)))
    }
}

impl<R: BufRead> VariantRecords<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: String::new(),
            line: 0,
            done: false,
        }
    }

    /// Number of lines consumed so far, comments included.
    pub fn lines_read(&self) -> usize {
        self.line
    }

    fn read_record(&mut self) -> Result<Option<VariantRecord>> {
        loop {
            self.buffer.clear();
            if self.inner.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let text = self.buffer.trim_end_matches(&['\n', '\r'][..]);
            if text.is_empty() || text.starts_with(COMMENT_PREFIX) {
                continue;
            }
            return VariantRecord::parse(self.line, text).map(Some);
        }
    }
}

impl<R: BufRead> Iterator for VariantRecords<R> {
    type Item = Result<VariantRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::record::Record;

    const VCF: &str = "##fileformat=VCFv4.1\n\
        #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
        1\t10\trs1\tA\tG\t.\t.\tALLELEID=1\n\
        \n\
        MT\t20\trs2\tC\tT\t.\t.\tALLELEID=2\r\n";

    #[test]
    fn test_skips_comments_and_blank_lines() {
        let records: Vec<_> = VariantRecords::new(VCF.as_bytes())
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line(), 3);
        assert_eq!(records[1].chrom(), "MT");
        assert_eq!(records[1].info_raw(), "ALLELEID=2");
        assert_eq!(records[1].line(), 5);
    }

    #[test]
    fn test_format_error_stops_iteration() {
        let vcf = "1\t10\t.\tA\tG\t.\t.\n1\t11\t.\tA\tG\t.\t.\tDB\n";
        let mut records = VariantRecords::new(vcf.as_bytes());
        assert!(matches!(
            records.next(),
            Some(Err(Error::Format { line: 1, found: 7, .. }))
        ));
        assert!(records.next().is_none());
    }
}
