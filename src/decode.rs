//! Decoding of the INFO column and of the SnpEff ANN value it carries.

use crate::error::{Error, Result};
use crate::parser;
use crate::record::EffectRecord;
use crate::types::{DeclaredInfoField, FieldType, InfoMap, InfoValue, Value, NONE_SENTINEL};

/// Split a raw INFO column into its entries.
///
/// `.` is the VCF spelling of "no INFO" and decodes to an empty map; a completely
/// empty column is [`Error::MalformedInfo`]. Empty tokens (as in `A=1;;B`) are skipped.
pub fn decode_info(raw: &str) -> Result<InfoMap<'_>> {
    if raw.is_empty() {
        return Err(Error::MalformedInfo);
    }
    if raw == "." {
        return Ok(InfoMap::new());
    }
    let (_, entries) = parser::info_entries(raw).map_err(|_| Error::MalformedInfo)?;
    Ok(entries
        .into_iter()
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key, value.map_or(InfoValue::Flag, InfoValue::Value)))
        .collect())
}

/// Lift the declared fields out of `info`, in declaration order.
///
/// Absent keys and bare flags project to null. A present value that does not parse as
/// the declared type is an [`Error::TypeCoercion`] naming the field and input line.
pub fn project_fields<'a, I>(
    info: &InfoMap<'_>,
    declared: I,
    line: usize,
) -> Result<Vec<Option<Value>>>
where
    I: IntoIterator<Item = DeclaredInfoField<'a>>,
{
    declared
        .into_iter()
        .map(|field| -> Result<Option<Value>> {
            let raw = match info.get(field.key).and_then(InfoValue::as_str) {
                Some(raw) => raw,
                None => return Ok(None),
            };
            let value = match field.kind {
                FieldType::Text => Value::Text(raw.to_owned()),
                FieldType::Integer => {
                    Value::Integer(raw.parse().map_err(|_| Error::TypeCoercion {
                        field: field.key.to_owned(),
                        value: raw.to_owned(),
                        line,
                        expected: field.kind,
                    })?)
                }
            };
            Ok(Some(value))
        })
        .collect()
}

/// Raw annotation value for `key`, or the `"None"` sentinel if the key is missing or a flag.
pub fn annotation_value<'a>(info: &InfoMap<'a>, key: &str) -> &'a str {
    info.get(key)
        .and_then(InfoValue::as_str)
        .unwrap_or(NONE_SENTINEL)
}

/// Split an ANN value into its effects, preserving the annotator's order.
///
/// Effects with the wrong number of sub-attributes are kept (see [`EffectRecord::is_malformed`]).
/// An empty value yields no effects.
pub fn decode_annotation(raw: &str) -> Vec<EffectRecord> {
    if raw.is_empty() {
        return Vec::new();
    }
    match parser::effects(raw) {
        Ok((_, groups)) => groups.into_iter().map(EffectRecord::new).collect(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InfoSchema;

    fn effect(allele: &str, gene: &str) -> String {
        format!(
            "{}|missense_variant|MODERATE|{}|ID1|transcript|NM_1|protein_coding|2/5|c.1A>G|p.M1V|1/10|1/9|1/3||",
            allele, gene
        )
    }

    #[test]
    fn test_decode_info() {
        let info = decode_info("ALLELEID=12;DB;CLNHGVS=NC_1:g.5A>G=x").unwrap();
        assert_eq!(info.len(), 3);
        assert_eq!(info["ALLELEID"], InfoValue::Value("12"));
        assert_eq!(info["DB"], InfoValue::Flag);
        assert_eq!(info["CLNHGVS"], InfoValue::Value("NC_1:g.5A>G=x"));
    }

    #[test]
    fn test_decode_info_edge_cases() {
        assert!(matches!(decode_info(""), Err(Error::MalformedInfo)));
        assert!(decode_info(".").unwrap().is_empty());
        let info = decode_info(";A=1;;").unwrap();
        assert_eq!(info.keys().copied().collect::<Vec<_>>(), vec!["A"]);
    }

    #[test]
    fn test_project_fields() {
        let schema: InfoSchema = "ALLELEID=int,CLNSIG=str,MISSING=int,DB=str".parse().unwrap();
        let info = decode_info("CLNSIG=Pathogenic;ALLELEID=-3;DB").unwrap();
        let values = project_fields(&info, schema.fields(), 1).unwrap();
        assert_eq!(
            values,
            vec![
                Some(Value::Integer(-3)),
                Some(Value::Text("Pathogenic".to_owned())),
                None,
                None,
            ]
        );
    }

    #[test]
    fn test_project_fields_coercion_failure() {
        let schema: InfoSchema = "ALLELEID=int".parse().unwrap();
        let info = decode_info("ALLELEID=12a").unwrap();
        let err = project_fields(&info, schema.fields(), 42).unwrap_err();
        match err {
            Error::TypeCoercion {
                field, value, line, ..
            } => {
                assert_eq!(field, "ALLELEID");
                assert_eq!(value, "12a");
                assert_eq!(line, 42);
            }
            e => panic!("unexpected error {:?}", e),
        }
        let info = decode_info("ALLELEID=").unwrap();
        assert!(project_fields(&info, schema.fields(), 1).is_err());
    }

    #[test]
    fn test_annotation_value() {
        let info = decode_info("ANN=A|b;DB;X=1").unwrap();
        assert_eq!(annotation_value(&info, "ANN"), "A|b");
        assert_eq!(annotation_value(&info, "DB"), "None");
        assert_eq!(annotation_value(&info, "EFF"), "None");
    }

    #[test]
    fn test_decode_annotation_order() {
        let raw = format!("{},{}", effect("A", "BRCA1"), effect("G", "TP53"));
        let effects = decode_annotation(&raw);
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0].gene_name(), Some("BRCA1"));
        assert_eq!(effects[1].gene_name(), Some("TP53"));
        assert!(effects.iter().all(|e| !e.is_malformed()));
    }

    #[test]
    fn test_decode_annotation_keeps_malformed() {
        let raw = format!("A|short|x,{}", effect("G", "TP53"));
        let effects = decode_annotation(&raw);
        assert_eq!(effects.len(), 2);
        assert!(effects[0].is_malformed());
        assert_eq!(effects[0].attributes(), ["A", "short", "x"]);
        assert!(!effects[1].is_malformed());

        assert!(decode_annotation("").is_empty());
    }
}
