//! nom combinators for the three levels of delimiting in an annotated VCF line:
//! tab-separated columns, `;`-separated INFO entries and `,`/`|`-separated effects.
//!
//! All parsers work on complete input and accept empty elements, so none of them
//! can fail on well-formed UTF-8; shape checks happen in the callers.

use nom::bytes::complete::take_till;
use nom::character::complete::char;
use nom::combinator::{all_consuming, opt};
use nom::multi::separated_list1;
use nom::sequence::{pair, preceded};
use nom::IResult;

pub(crate) type InfoEntry<'a> = (&'a str, Option<&'a str>);

/// Splits a data line into its tab-separated columns.
pub(crate) fn columns(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(separated_list1(char('\t'), take_till(|c: char| c == '\t')))(input)
}

/// `KEY` or `KEY=value`; only the first `=` separates, the value may contain more.
fn info_entry(input: &str) -> IResult<&str, InfoEntry<'_>> {
    pair(
        take_till(|c: char| c == ';' || c == '='),
        opt(preceded(char('='), take_till(|c: char| c == ';'))),
    )(input)
}

pub(crate) fn info_entries(input: &str) -> IResult<&str, Vec<InfoEntry<'_>>> {
    all_consuming(separated_list1(char(';'), info_entry))(input)
}

fn effect(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char('|'), take_till(|c: char| c == '|' || c == ','))(input)
}

/// Splits an ANN value into effect groups, each split into its sub-attributes.
pub(crate) fn effects(input: &str) -> IResult<&str, Vec<Vec<&str>>> {
    all_consuming(separated_list1(char(','), effect))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns() {
        let (_, cols) = columns("1\t10\t.\tA\tG\t.\t.\tAF=0.5").unwrap();
        assert_eq!(cols, vec!["1", "10", ".", "A", "G", ".", ".", "AF=0.5"]);

        let (_, cols) = columns("1\t\t").unwrap();
        assert_eq!(cols, vec!["1", "", ""]);
    }

    #[test]
    fn test_info_entries() {
        let (_, entries) = info_entries("AF=0.5;DB;CLNDN=a=b").unwrap();
        assert_eq!(
            entries,
            vec![("AF", Some("0.5")), ("DB", None), ("CLNDN", Some("a=b"))]
        );
    }

    #[test]
    fn test_info_entries_empty_tokens() {
        let (_, entries) = info_entries("AF=1;;").unwrap();
        assert_eq!(entries, vec![("AF", Some("1")), ("", None), ("", None)]);

        let (_, entries) = info_entries("X=").unwrap();
        assert_eq!(entries, vec![("X", Some(""))]);
    }

    #[test]
    fn test_effects() {
        let (_, groups) = effects("A|x|y,C||z").unwrap();
        assert_eq!(groups, vec![vec!["A", "x", "y"], vec!["C", "", "z"]]);

        let (_, groups) = effects("").unwrap();
        assert_eq!(groups, vec![vec![""]]);
    }
}
