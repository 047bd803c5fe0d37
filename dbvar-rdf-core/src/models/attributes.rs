//! Column 9 of a GVF line: `tag1=v1,v2;tag2=v3`.
//!
//! Each value is a comma-delimited list in which elements may be double
//! quoted (so they can contain commas) and are percent-decoded. A `.` element
//! is an absent value.

use std::collections::HashMap;
use std::str::FromStr;

use crate::errors::GvfError;

pub const INFO_DELIMITER: char = ';';
pub const VALUE_DELIMITER: char = ',';
pub const MISSING_VALUE: &str = ".";

/// Values of one tag. `None` marks an absent (`.`) element.
pub type AttributeValues = Vec<Option<String>>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    inner: HashMap<String, AttributeValues>,
}

impl Attributes {
    pub fn new() -> Self {
        Attributes::default()
    }

    pub fn insert<S: Into<String>>(&mut self, tag: S, values: AttributeValues) {
        self.inner.insert(tag.into(), values);
    }

    pub fn get(&self, tag: &str) -> Option<&[Option<String>]> {
        self.inner.get(tag).map(|v| v.as_slice())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.inner.contains_key(tag)
    }

    ///
    /// The first element listed for `tag`, if that element is present.
    ///
    pub fn first(&self, tag: &str) -> Option<&str> {
        self.inner
            .get(tag)
            .and_then(|v| v.first())
            .and_then(|v| v.as_deref())
    }

    ///
    /// The present elements listed for `tag`, skipping absent ones.
    ///
    pub fn present(&self, tag: &str) -> Option<Vec<&str>> {
        self.inner
            .get(tag)
            .map(|v| v.iter().filter_map(|x| x.as_deref()).collect())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValues)> {
        self.inner.iter()
    }

    ///
    /// Render the attribute block back to column 9 syntax. Tags are written
    /// in sorted order; elements are percent-encoded so that decoding the
    /// output gives back the same map.
    ///
    pub fn encode(&self) -> String {
        let mut tags: Vec<&String> = self.inner.keys().collect();
        tags.sort();

        tags.iter()
            .map(|tag| {
                let values = &self.inner[*tag];
                if values.is_empty() {
                    return tag.to_string();
                }
                let encoded: Vec<String> = values.iter().map(|v| encode_value(v.as_deref())).collect();
                format!("{}={}", tag, encoded.join(","))
            })
            .collect::<Vec<_>>()
            .join(";")
    }
}

fn encode_value(value: Option<&str>) -> String {
    match value {
        None => MISSING_VALUE.to_string(),
        Some("") => "\"\"".to_string(),
        Some(MISSING_VALUE) => "%2E".to_string(),
        Some(v) => urlencoding::encode(v).into_owned(),
    }
}

impl FromStr for Attributes {
    type Err = GvfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut attributes = Attributes::new();

        for group in s.split(INFO_DELIMITER) {
            let group = group.trim();
            if group.is_empty() {
                continue;
            }

            let (tag, value) = match group.split_once('=') {
                Some((tag, value)) => (tag.trim(), value),
                None => (group, ""),
            };
            if tag.is_empty() {
                return Err(GvfError::EmptyTag(group.to_string()));
            }

            let values = parse_value_list(tag, value)?;
            attributes.insert(tag, values);
        }

        Ok(attributes)
    }
}

///
/// Split one attribute value into its elements, honouring double quotes
/// (`""` inside quotes is a literal quote), then percent-decode each element.
///
fn parse_value_list(tag: &str, value: &str) -> Result<AttributeValues, GvfError> {
    let mut values = Vec::new();
    if value.is_empty() {
        return Ok(values);
    }

    let mut chars = value.chars().peekable();

    'fields: loop {
        let mut field = String::new();

        if chars.peek() == Some(&'"') {
            chars.next();
            loop {
                match chars.next() {
                    None => return Err(GvfError::UnterminatedQuote(tag.to_string())),
                    Some('"') => {
                        if chars.peek() == Some(&'"') {
                            chars.next();
                            field.push('"');
                        } else {
                            break;
                        }
                    }
                    Some(c) => field.push(c),
                }
            }
            values.push(Some(decode_element(tag, &field)?));
            match chars.next() {
                None => break 'fields,
                Some(VALUE_DELIMITER) => continue 'fields,
                Some(_) => return Err(GvfError::IllegalQuote(tag.to_string())),
            }
        }

        loop {
            match chars.next() {
                None => {
                    values.push(decode_unquoted(tag, &field)?);
                    break 'fields;
                }
                Some(VALUE_DELIMITER) => {
                    values.push(decode_unquoted(tag, &field)?);
                    continue 'fields;
                }
                Some('"') => return Err(GvfError::IllegalQuote(tag.to_string())),
                Some(c) => field.push(c),
            }
        }
    }

    Ok(values
        .into_iter()
        .map(|v| v.filter(|s| s != MISSING_VALUE))
        .collect())
}

fn decode_unquoted(tag: &str, field: &str) -> Result<Option<String>, GvfError> {
    if field.is_empty() || field == MISSING_VALUE {
        return Ok(None);
    }
    decode_element(tag, field).map(Some)
}

fn decode_element(tag: &str, field: &str) -> Result<String, GvfError> {
    urlencoding::decode(field)
        .map(|v| v.into_owned())
        .map_err(|_| GvfError::PercentDecode {
            tag: tag.to_string(),
            value: field.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn some(values: &[&str]) -> AttributeValues {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    #[rstest]
    fn test_parse_simple_block() {
        let attrs: Attributes = "ID=1;Name=nssv1;Dbxref=dbSNP:rs5,PubMed:123"
            .parse()
            .unwrap();

        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.first("Name"), Some("nssv1"));
        assert_eq!(attrs.get("Dbxref").unwrap(), some(&["dbSNP:rs5", "PubMed:123"]).as_slice());
    }

    #[rstest]
    fn test_quoted_value_keeps_commas() {
        let attrs: Attributes = "phenotype=\"Autism, spectrum\",\"say \"\"hi\"\"\""
            .parse()
            .unwrap();

        assert_eq!(
            attrs.get("phenotype").unwrap(),
            some(&["Autism, spectrum", "say \"hi\""]).as_slice()
        );
    }

    #[rstest]
    fn test_percent_decoding() {
        let attrs: Attributes = "phenotype=Developmental%20delay%3B%20seizures".parse().unwrap();
        assert_eq!(attrs.first("phenotype"), Some("Developmental delay; seizures"));
    }

    #[rstest]
    fn test_missing_values_are_absent() {
        let attrs: Attributes = "Start_range=.,1000;Zygosity=.".parse().unwrap();

        assert_eq!(
            attrs.get("Start_range").unwrap(),
            &[None, Some("1000".to_string())]
        );
        assert_eq!(attrs.first("Zygosity"), None);
        assert!(attrs.contains("Zygosity"));
    }

    #[rstest]
    #[case("Is_circular")]
    #[case("Is_circular=")]
    fn test_tag_without_value_is_empty_list(#[case] block: &str) {
        let attrs: Attributes = block.parse().unwrap();
        assert_eq!(attrs.get("Is_circular").unwrap().len(), 0);
    }

    #[rstest]
    fn test_trailing_delimiter_is_ignored() {
        let attrs: Attributes = "ID=1;Name=esv2;".parse().unwrap();
        assert_eq!(attrs.len(), 2);
    }

    #[rstest]
    #[case("phenotype=\"open", GvfError::UnterminatedQuote("phenotype".to_string()))]
    #[case("phenotype=\"closed\"x", GvfError::IllegalQuote("phenotype".to_string()))]
    #[case("phenotype=ab\"c", GvfError::IllegalQuote("phenotype".to_string()))]
    #[case("=value", GvfError::EmptyTag("=value".to_string()))]
    fn test_malformed_blocks(#[case] block: &str, #[case] expected: GvfError) {
        assert_eq!(block.parse::<Attributes>().unwrap_err(), expected);
    }

    #[rstest]
    fn test_invalid_utf8_escape() {
        let err = "Name=%FF%FE".parse::<Attributes>().unwrap_err();
        assert!(matches!(err, GvfError::PercentDecode { .. }));
    }

    #[rstest]
    #[case("ID=1;Name=nssv1;Dbxref=dbSNP:rs5,PubMed:123")]
    #[case("phenotype=\"Autism, spectrum\",Epilepsy;Start_range=.,1000")]
    #[case("clinical_int=Pathogenic%3B likely;Is_circular;Note=\"\"")]
    #[case("Variant_seq=~100;Reference_seq=-;Zygosity=.")]
    fn test_encode_then_decode_recovers_map(#[case] block: &str) {
        let attrs: Attributes = block.parse().unwrap();
        let decoded: Attributes = attrs.encode().parse().unwrap();
        assert_eq!(decoded, attrs);
    }
}
