use std::cell::OnceCell;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::{ConfigError, ModelError, ModelResult, ValidationError};
use crate::models::attributes::Attributes;
use crate::models::record::GvfRecord;
use crate::models::statement_set::StatementSet;
use crate::models::term::Iri;
use crate::vocab;

///
/// The two kinds of dbVar entity a GVF file can describe.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    VariantCall,
    VariantRegion,
}

impl EntityKind {
    /// Namespace the entity identifier is appended to.
    pub fn base(&self) -> Iri {
        match self {
            EntityKind::VariantCall => Iri::new(vocab::DBVARVC),
            EntityKind::VariantRegion => Iri::new(vocab::DBVARV),
        }
    }

    pub fn class(&self) -> Iri {
        match self {
            EntityKind::VariantCall => vocab::dbvar("VariantCall"),
            EntityKind::VariantRegion => vocab::dbvar("VariantRegion"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::VariantCall => "variant_call",
            EntityKind::VariantRegion => "variant_region",
        }
    }
}

impl FromStr for EntityKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "variant_call" => Ok(EntityKind::VariantCall),
            "variant_region" => Ok(EntityKind::VariantRegion),
            _ => Err(ConfigError::UnknownModel(s.to_string())),
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

///
/// A pair of optional coordinates, e.g. `Start_range=.,1000` or `cipos=-10,10`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub lower: Option<i64>,
    pub upper: Option<i64>,
}

impl Bounds {
    pub fn new(lower: Option<i64>, upper: Option<i64>) -> Self {
        Bounds { lower, upper }
    }
}

///
/// The required fields of a variant, borrowed after a successful
/// [`Variant::validate`].
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Required<'a> {
    pub chromosome: &'a str,
    pub variation_class: &'a str,
    pub start: i64,
    pub end: i64,
    pub id: &'a str,
}

///
/// A variant call or variant region: the domain projection of one GVF record.
///
/// Statements are produced at most once per entity; see
/// [`Variant::statements`].
///
#[derive(Debug, Clone, Default)]
pub struct Variant {
    pub kind: Option<EntityKind>,

    /// GRC assembly, e.g. `GRCh38`
    pub reference: Option<String>,
    /// RefSeq / INSDC accession of the chromosome or contig
    pub chromosome: Option<String>,
    /// SO term name of the sequence alteration
    pub variation_class: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub id: Option<String>,

    /// `(database, identifier)` pairs from `Dbxref`
    pub cross_references: Vec<(String, String)>,
    pub alternative_allele: Option<String>,
    pub reference_allele: Option<String>,
    pub start_range: Option<Bounds>,
    pub end_range: Option<Bounds>,
    pub zygosity: Option<String>,

    pub parents: Vec<String>,
    pub clinical_significance: Vec<String>,
    pub phenotype_names: Vec<String>,
    /// `(database, identifier)` pairs from `phenotype_id`
    pub phenotypes: Vec<(String, String)>,
    pub cipos: Option<Bounds>,
    pub ciend: Option<Bounds>,
    pub allele_count: Option<i64>,
    pub allele_number: Option<i64>,
    pub allele_frequency: Option<f64>,

    pub(crate) statements: OnceCell<StatementSet>,
}

impl Variant {
    ///
    /// Project a parsed record onto a variant of the given kind.
    ///
    /// Fails only when a numeric attribute does not parse; missing required
    /// fields are reported later by [`Variant::validate`].
    ///
    pub fn from_record(kind: EntityKind, record: &GvfRecord) -> ModelResult<Self> {
        let attrs = &record.attributes;

        Ok(Variant {
            kind: Some(kind),
            reference: record.header.reference_build(),
            chromosome: non_empty(&record.seqid),
            variation_class: non_empty(&record.feature_type),
            start: Some(record.start),
            end: Some(record.end),
            id: attrs
                .first("Name")
                .or_else(|| attrs.first("ID"))
                .and_then(non_empty),
            cross_references: pairs(attrs, "Dbxref"),
            alternative_allele: attrs.first("Variant_seq").map(str::to_string),
            reference_allele: attrs.first("Reference_seq").map(str::to_string),
            start_range: bounds(attrs, "Start_range")?,
            end_range: bounds(attrs, "End_range")?,
            zygosity: attrs.first("Zygosity").map(str::to_string),
            parents: list(attrs, "parent"),
            clinical_significance: list(attrs, "clinical_int"),
            phenotype_names: list(attrs, "phenotype"),
            phenotypes: pairs(attrs, "phenotype_id"),
            cipos: bounds(attrs, "cipos")?,
            ciend: bounds(attrs, "ciend")?,
            allele_count: number(attrs, "allele_count")?,
            allele_number: number(attrs, "allele_number")?,
            allele_frequency: match attrs.first("allele_frequency") {
                Some(v) => Some(v.parse::<f64>().map_err(|_| ModelError::InvalidAttribute {
                    tag: "allele_frequency",
                    value: v.to_string(),
                })?),
                None => None,
            },
            statements: OnceCell::new(),
        })
    }

    ///
    /// Check the required fields: chromosome, variation class, start, end and
    /// id. Every missing field is reported at once.
    ///
    pub fn validate(&self) -> Result<Required<'_>, ValidationError> {
        let chromosome = self.chromosome.as_deref().filter(|v| !v.is_empty());
        let variation_class = self.variation_class.as_deref().filter(|v| !v.is_empty());
        let id = self.id.as_deref().filter(|v| !v.is_empty());

        match (chromosome, variation_class, self.start, self.end, id) {
            (Some(chromosome), Some(variation_class), Some(start), Some(end), Some(id)) => Ok(Required {
                chromosome,
                variation_class,
                start,
                end,
                id,
            }),
            (chromosome, variation_class, start, end, id) => {
                let missing = [
                    ("chromosome", chromosome.is_none()),
                    ("variation_class", variation_class.is_none()),
                    ("start", start.is_none()),
                    ("end", end.is_none()),
                    ("id", id.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                Err(ValidationError { missing })
            }
        }
    }

    ///
    /// The canonical subject IRI, once `id` is known.
    ///
    pub fn subject(&self) -> Option<Iri> {
        let kind = self.kind.unwrap_or(EntityKind::VariantCall);
        self.id.as_deref().map(|id| kind.base().join(id))
    }
}

fn non_empty(value: &str) -> Option<String> {
    Some(value.to_string()).filter(|v| !v.is_empty())
}

fn list(attrs: &Attributes, tag: &str) -> Vec<String> {
    attrs
        .present(tag)
        .unwrap_or_default()
        .into_iter()
        .map(str::to_string)
        .collect()
}

///
/// Split `source:identifier` elements on the first colon. Elements without a
/// colon keep an empty identifier so the dispatch tables can drop them.
///
fn pairs(attrs: &Attributes, tag: &str) -> Vec<(String, String)> {
    attrs
        .present(tag)
        .unwrap_or_default()
        .into_iter()
        .map(|x| match x.split_once(':') {
            Some((source, id)) => (source.to_string(), id.to_string()),
            None => (x.to_string(), String::new()),
        })
        .collect()
}

fn bounds(attrs: &Attributes, tag: &'static str) -> ModelResult<Option<Bounds>> {
    let values = match attrs.get(tag) {
        Some(values) if !values.is_empty() => values,
        _ => return Ok(None),
    };

    let parse = |v: Option<&Option<String>>| -> ModelResult<Option<i64>> {
        match v.and_then(|x| x.as_deref()) {
            Some(x) => x
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ModelError::InvalidAttribute {
                    tag,
                    value: x.to_string(),
                }),
            None => Ok(None),
        }
    };

    Ok(Some(Bounds::new(parse(values.first())?, parse(values.get(1))?)))
}

fn number(attrs: &Attributes, tag: &'static str) -> ModelResult<Option<i64>> {
    match attrs.first(tag) {
        Some(v) => v
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ModelError::InvalidAttribute {
                tag,
                value: v.to_string(),
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::models::record::GvfHeader;

    fn record(attributes: &str) -> GvfRecord {
        let mut header = GvfHeader::new();
        header.push_line("##assembly-name GRCh38");
        let line = format!("NC_000001.11\tdbVar\tdeletion\t100\t200\t.\t.\t.\t{}", attributes);
        GvfRecord::parse(&line, Arc::new(header)).unwrap()
    }

    #[rstest]
    fn test_from_record_maps_attributes() {
        let record = record(
            "ID=1;Name=nssv14;Dbxref=dbSNP:rs5,PubMed:2345;Variant_seq=A;Reference_seq=G;\
             Start_range=.,95;End_range=205,.;Zygosity=heterozygous;parent=nsv12;\
             clinical_int=Pathogenic;phenotype=Autism;phenotype_id=HP:0000717;\
             allele_count=3;allele_number=10;allele_frequency=0.3",
        );
        let variant = Variant::from_record(EntityKind::VariantCall, &record).unwrap();

        assert_eq!(variant.reference.as_deref(), Some("GRCh38"));
        assert_eq!(variant.chromosome.as_deref(), Some("NC_000001.11"));
        assert_eq!(variant.variation_class.as_deref(), Some("deletion"));
        assert_eq!(variant.id.as_deref(), Some("nssv14"));
        assert_eq!(
            variant.cross_references,
            vec![
                ("dbSNP".to_string(), "rs5".to_string()),
                ("PubMed".to_string(), "2345".to_string())
            ]
        );
        assert_eq!(variant.start_range, Some(Bounds::new(None, Some(95))));
        assert_eq!(variant.end_range, Some(Bounds::new(Some(205), None)));
        assert_eq!(variant.zygosity.as_deref(), Some("heterozygous"));
        assert_eq!(variant.parents, vec!["nsv12".to_string()]);
        assert_eq!(variant.phenotypes, vec![("HP".to_string(), "0000717".to_string())]);
        assert_eq!(variant.allele_count, Some(3));
        assert_eq!(variant.allele_number, Some(10));
        assert_eq!(variant.allele_frequency, Some(0.3));
        assert!(variant.validate().is_ok());
    }

    #[rstest]
    fn test_id_falls_back_to_id_attribute() {
        let variant = Variant::from_record(EntityKind::VariantRegion, &record("ID=esv1")).unwrap();
        assert_eq!(variant.id.as_deref(), Some("esv1"));
        assert_eq!(
            variant.subject().unwrap().as_str(),
            "http://med2rdf.org/dbvar/variation/esv1"
        );
    }

    #[rstest]
    fn test_invalid_numeric_attribute() {
        let err = Variant::from_record(EntityKind::VariantCall, &record("ID=1;cipos=-10,abc")).unwrap_err();
        assert!(matches!(err, ModelError::InvalidAttribute { tag: "cipos", .. }));
    }

    #[rstest]
    fn test_validate_reports_every_missing_field() {
        let variant = Variant::default();
        let err = variant.validate().unwrap_err();
        assert_eq!(err.missing, vec!["chromosome", "variation_class", "start", "end", "id"]);
    }

    #[rstest]
    fn test_validate_missing_id() {
        let variant = Variant::from_record(EntityKind::VariantCall, &record("Zygosity=.")).unwrap();
        assert_eq!(variant.validate().unwrap_err().missing, vec!["id"]);
    }

    #[rstest]
    #[case("variant_call", EntityKind::VariantCall)]
    #[case("variant_region", EntityKind::VariantRegion)]
    fn test_entity_kind_from_str(#[case] name: &str, #[case] expected: EntityKind) {
        assert_eq!(name.parse::<EntityKind>().unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }

    #[rstest]
    fn test_unknown_entity_kind() {
        assert!("variant".parse::<EntityKind>().is_err());
    }
}
