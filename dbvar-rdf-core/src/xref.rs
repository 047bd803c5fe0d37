//! Dispatch tables from `(database, identifier)` pairs to IRIs.
//!
//! A table is an ordered list of rules. The first rule whose source label
//! equals the pair's database and whose pattern matches the identifier wins;
//! the first capture group of the pattern is the identifier written into the
//! target. A database may have several rules (GENBANK tries RefSeq accessions
//! before INSDC ones).

use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::DropReason;
use crate::models::term::Iri;
use crate::vocab;

const TRACE_TEMPLATE: &str =
    "https://www.ncbi.nlm.nih.gov/Traces/trace.cgi?cmd=retrieve&val=TEMPLATE_ID=%27{}%27";
const CLINGEN_TEMPLATE: &str = "https://www.ncbi.nlm.nih.gov/projects/dbvar/clingen/clingen_region.cgi?id={}";
const GENE_TEMPLATE: &str =
    "https://www.ncbi.nlm.nih.gov/sites/entrez?Db=gene&Cmd=DetailsSearch&Term={}[sym]+AND+txid9606[orgn]";
const GENEREVIEWS_TEMPLATE: &str = "https://www.ncbi.nlm.nih.gov/books/{}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The source is recognised and never linked.
    Suppressed,
    /// `<base><prefix><id>`
    Namespace {
        base: &'static str,
        prefix: &'static str,
    },
    /// A URL with a single `{}` placeholder.
    Template(&'static str),
}

impl Target {
    fn iri(&self, id: &str) -> Option<Iri> {
        match self {
            Target::Suppressed => None,
            Target::Namespace { base, prefix } => Some(Iri::new(format!("{}{}{}", base, prefix, id))),
            Target::Template(template) => Some(Iri::new(template.replacen("{}", id, 1))),
        }
    }
}

#[derive(Debug)]
pub struct Rule {
    pub source: &'static str,
    pub pattern: Option<Regex>,
    pub target: Target,
}

impl Rule {
    fn new(source: &'static str, pattern: &str, target: Target) -> Self {
        Rule {
            source,
            pattern: Some(Regex::new(pattern).expect("valid dispatch pattern")),
            target,
        }
    }

    fn suppressed(source: &'static str) -> Self {
        Rule {
            source,
            pattern: None,
            target: Target::Suppressed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(Iri),
    Dropped(DropReason),
}

impl Resolution {
    pub fn iri(self) -> Option<Iri> {
        match self {
            Resolution::Resolved(iri) => Some(iri),
            Resolution::Dropped(_) => None,
        }
    }
}

fn namespace(base: &'static str) -> Target {
    Target::Namespace { base, prefix: "" }
}

/// Objects of `rdfs:seeAlso`, keyed by `Dbxref` database.
pub static CROSS_REFERENCE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::suppressed("URL"),
        Rule::suppressed("CLONE"),
        Rule::new("ClinVar", r"(SCV\d+)", namespace(vocab::CLINVAR)),
        Rule::new("PubMed", r"(\d+)", namespace(vocab::PUBMED)),
        Rule::new("OMIM", r"(\d+)", namespace(vocab::OMIM)),
        Rule::new(
            "GENBANK",
            r"(((AC|AP|NC|NG|NM|NP|NR|NT|NW|XM|XP|XR|YP|ZP)_\d+|NZ_[A-Z]{4}\d+)(\.\d+)?)",
            namespace(vocab::REFSEQ),
        ),
        Rule::new(
            "GENBANK",
            r"(([A-Z]\d{5}|[A-Z]{2}\d{6}|[A-Z]{4}\d{8}|[A-J][A-Z]{2}\d{5})(\.\d+)?)",
            namespace(vocab::GENBANK),
        ),
        Rule::new("TRACE", r"TEMPLATE_ID=([A-Z0-9]+)", Target::Template(TRACE_TEMPLATE)),
        Rule::new("dbSNP", r"(rs\d+)", namespace(vocab::DBSNP)),
        Rule::new("ClinGen", r"([A-Z]+-\d+)", Target::Template(CLINGEN_TEMPLATE)),
        Rule::new("GENE", r"([A-Za-z0-9\-_]+)", Target::Template(GENE_TEMPLATE)),
        Rule::new("GeneReviews", r"(NBK\d+)", Target::Template(GENEREVIEWS_TEMPLATE)),
        Rule::new("dbVar", r"([en]sv\d+)", namespace(vocab::DBVARV)),
    ]
});

/// Objects of `m2r:disease`, keyed by `phenotype_id` database.
pub static PHENOTYPE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new("MeSH", r"([CD]\d{6})$", namespace(vocab::MESH)),
        Rule::new("HP", r"(\d{7})$", namespace(vocab::HP)),
        Rule::new("MedGen", r"([CN]*\d{4,7})$", namespace(vocab::MEDGEN)),
        Rule::new("Orphanet", r"(Orphanet[_:]C?\d+)", namespace(vocab::ORDO)),
        Rule::new("OMIM", r"(\d+)", namespace(vocab::OMIM)),
        Rule::new(
            "DO",
            r"(\d+)",
            Target::Namespace {
                base: vocab::DOID,
                prefix: "DOID:",
            },
        ),
        Rule::new(
            "MONDO",
            r"(\d+)",
            Target::Namespace {
                base: vocab::OBO,
                prefix: "MONDO_",
            },
        ),
    ]
});

/// Parent variant regions, written as `dbvarv:<id>`.
static PARENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([en]sv\d+)").expect("valid parent pattern"));

///
/// Resolve one pair against an ordered rule table.
///
pub fn resolve(rules: &[Rule], source: &str, id: &str) -> Resolution {
    let mut known = false;

    for rule in rules.iter().filter(|r| r.source == source) {
        known = true;

        let pattern = match (&rule.target, &rule.pattern) {
            (Target::Suppressed, _) | (_, None) => return Resolution::Dropped(DropReason::Suppressed),
            (_, Some(pattern)) => pattern,
        };

        let matched = pattern
            .captures(id)
            .and_then(|caps| caps.get(1))
            .and_then(|m| rule.target.iri(m.as_str()));

        if let Some(iri) = matched {
            return Resolution::Resolved(iri);
        }
    }

    match known {
        true => Resolution::Dropped(DropReason::Unmatched),
        false => Resolution::Dropped(DropReason::UnknownSource),
    }
}

pub fn cross_reference(source: &str, id: &str) -> Resolution {
    resolve(&CROSS_REFERENCE_RULES, source, id)
}

pub fn phenotype(source: &str, id: &str) -> Resolution {
    resolve(&PHENOTYPE_RULES, source, id)
}

///
/// The variant region a `parent` value names, e.g. `nsv123`.
///
pub fn parent(value: &str) -> Option<Iri> {
    PARENT
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| Iri::new(vocab::DBVARV).join(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("dbSNP", "rs12345", "http://identifiers.org/dbsnp/rs12345")]
    #[case("ClinVar", "SCV000080512", "http://identifiers.org/clinvar.submission/SCV000080512")]
    #[case("PubMed", "20811451", "http://identifiers.org/pubmed/20811451")]
    #[case("OMIM", "608636", "http://identifiers.org/mim/608636")]
    #[case("GENBANK", "NG_007404.1", "http://identifiers.org/refseq/NG_007404.1")]
    #[case("GENBANK", "AC123456.2", "http://identifiers.org/insdc/AC123456.2")]
    #[case(
        "TRACE",
        "TEMPLATE_ID=ABC123",
        "https://www.ncbi.nlm.nih.gov/Traces/trace.cgi?cmd=retrieve&val=TEMPLATE_ID=%27ABC123%27"
    )]
    #[case(
        "ClinGen",
        "ISCA-46295",
        "https://www.ncbi.nlm.nih.gov/projects/dbvar/clingen/clingen_region.cgi?id=ISCA-46295"
    )]
    #[case(
        "GENE",
        "BRCA1",
        "https://www.ncbi.nlm.nih.gov/sites/entrez?Db=gene&Cmd=DetailsSearch&Term=BRCA1[sym]+AND+txid9606[orgn]"
    )]
    #[case("GeneReviews", "NBK1247", "https://www.ncbi.nlm.nih.gov/books/NBK1247")]
    #[case("dbVar", "nsv1234", "http://med2rdf.org/dbvar/variation/nsv1234")]
    fn test_cross_reference(#[case] source: &str, #[case] id: &str, #[case] expected: &str) {
        assert_eq!(cross_reference(source, id), Resolution::Resolved(Iri::new(expected)));
    }

    #[rstest]
    #[case("URL", "https://example.org", DropReason::Suppressed)]
    #[case("CLONE", "RP11-1234", DropReason::Suppressed)]
    #[case("dbSNP", "12345", DropReason::Unmatched)]
    #[case("GENBANK", "lowercase", DropReason::Unmatched)]
    #[case("Ensembl", "ENSG00000012048", DropReason::UnknownSource)]
    #[case("dbsnp", "rs12345", DropReason::UnknownSource)]
    fn test_cross_reference_dropped(#[case] source: &str, #[case] id: &str, #[case] reason: DropReason) {
        assert_eq!(cross_reference(source, id), Resolution::Dropped(reason));
    }

    #[rstest]
    #[case("MeSH", "D001321", "http://identifiers.org/mesh/D001321")]
    #[case("HP", "HP:0000717", "http://identifiers.org/hp/0000717")]
    #[case("MedGen", "C1510586", "http://identifiers.org/medgen/C1510586")]
    #[case("Orphanet", "Orphanet_1234", "http://identifiers.org/orphanet/Orphanet_1234")]
    #[case("OMIM", "608636", "http://identifiers.org/mim/608636")]
    #[case("DO", "DOID:12849", "http://identifiers.org/doid/DOID:12849")]
    #[case("MONDO", "0005258", "http://purl.obolibrary.org/obo/MONDO_0005258")]
    fn test_phenotype(#[case] source: &str, #[case] id: &str, #[case] expected: &str) {
        assert_eq!(phenotype(source, id), Resolution::Resolved(Iri::new(expected)));
    }

    #[rstest]
    #[case("MeSH", "D0013", DropReason::Unmatched)]
    #[case("HP", "000071", DropReason::Unmatched)]
    #[case("EFO", "0000270", DropReason::UnknownSource)]
    fn test_phenotype_dropped(#[case] source: &str, #[case] id: &str, #[case] reason: DropReason) {
        assert_eq!(phenotype(source, id), Resolution::Dropped(reason));
    }

    #[rstest]
    #[case("nsv1234", Some("http://med2rdf.org/dbvar/variation/nsv1234"))]
    #[case("esv2", Some("http://med2rdf.org/dbvar/variation/esv2"))]
    #[case("nssv1", None)]
    fn test_parent(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(parent(value), expected.map(Iri::new));
    }
}
