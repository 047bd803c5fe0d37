//! FALDO locations for variants.
//!
//! Each side of a variant (begin, end) becomes either a `faldo:ExactPosition`
//! or a `faldo:FuzzyPosition` bounded by up to two inner exact positions.
//! An explicit range (`Start_range` / `End_range`) takes precedence over a
//! confidence interval (`cipos` / `ciend`).

use crate::errors::{MappingError, ModelError, ModelResult};
use crate::mappings::LookupResolver;
use crate::models::statement_set::StatementSet;
use crate::models::term::Iri;
use crate::models::variant::Bounds;
use crate::vocab::{self, faldo};

/// Path segment used in place of the assembly when the header names none.
pub const UNKNOWN_BUILD: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Exact(i64),
    Fuzzy { begin: Option<i64>, end: Option<i64> },
}

impl Position {
    ///
    /// Model one side of a variant.
    ///
    /// # Arguments
    /// - anchor: the side's own coordinate (start or end)
    /// - range: literal bounds of the ambiguity range
    /// - interval: signed offsets from `anchor`
    ///
    /// # Returns
    /// - `None` when `anchor` plus an offset overflows
    pub fn model(anchor: i64, range: Option<Bounds>, interval: Option<Bounds>) -> Option<Self> {
        if let Some(range) = range {
            return Some(Position::Fuzzy {
                begin: range.lower,
                end: range.upper,
            });
        }
        if let Some(interval) = interval {
            let shift = |offset: Option<i64>| match offset {
                Some(offset) => anchor.checked_add(offset).map(Some),
                None => Some(None),
            };
            return Some(Position::Fuzzy {
                begin: shift(interval.lower)?,
                end: shift(interval.upper)?,
            });
        }
        Some(Position::Exact(anchor))
    }

    /// Number of `faldo:ExactPosition` nodes this position expands to.
    pub fn exact_count(&self) -> usize {
        match self {
            Position::Exact(_) => 1,
            Position::Fuzzy { begin, end } => begin.iter().count() + end.iter().count(),
        }
    }
}

///
/// The `faldo:reference` objects for a chromosome accession: the HCO
/// identifier plus the RefSeq accession when the lookup is unique, the INSDC
/// accession otherwise.
///
pub fn reference_ids<R: LookupResolver + ?Sized>(
    resolver: &R,
    chromosome: &str,
    assembly: Option<&str>,
) -> Result<Vec<Iri>, MappingError> {
    Ok(match resolver.chromosome(chromosome, assembly)? {
        Some(hco) => vec![hco, Iri::new(vocab::REFSEQ).join(chromosome)],
        None => vec![Iri::new(vocab::INSDC).join(chromosome)],
    })
}

///
/// Input of [`location`]: the coordinate fields of a validated variant.
///
#[derive(Debug, Clone, Copy)]
pub struct Coordinates<'a> {
    pub chromosome: &'a str,
    pub assembly: Option<&'a str>,
    pub start: i64,
    pub end: i64,
    pub start_range: Option<Bounds>,
    pub end_range: Option<Bounds>,
    pub cipos: Option<Bounds>,
    pub ciend: Option<Bounds>,
}

///
/// Build the location sub-graph of `subject`, rooted at
/// `<subject>/position/<assembly>/<chromosome>`.
///
pub fn location<R: LookupResolver + ?Sized>(
    subject: &Iri,
    coords: &Coordinates,
    resolver: &R,
) -> ModelResult<StatementSet> {
    let references = reference_ids(resolver, coords.chromosome, coords.assembly)?;

    let region = subject
        .join("position")
        .join(coords.assembly.unwrap_or(UNKNOWN_BUILD))
        .join(coords.chromosome);

    let mut graph = StatementSet::new();
    graph.insert(subject, faldo("location"), region.clone());
    graph.insert(&region, vocab::rdf_type(), faldo("Region"));

    let begin = region.join("begin");
    graph.insert(&region, faldo("begin"), begin.clone());
    let position = Position::model(coords.start, coords.start_range, coords.cipos)
        .ok_or_else(|| out_of_range("cipos", coords.cipos))?;
    graph.merge(side(&begin, position, &references));

    let end = region.join("end");
    graph.insert(&region, faldo("end"), end.clone());
    let position = Position::model(coords.end, coords.end_range, coords.ciend)
        .ok_or_else(|| out_of_range("ciend", coords.ciend))?;
    graph.merge(side(&end, position, &references));

    Ok(graph)
}

fn out_of_range(tag: &'static str, interval: Option<Bounds>) -> ModelError {
    let bound = |b: Option<i64>| b.map_or_else(|| ".".to_string(), |b| b.to_string());
    let value = interval
        .map(|i| format!("{},{}", bound(i.lower), bound(i.upper)))
        .unwrap_or_default();
    ModelError::InvalidAttribute { tag, value }
}

fn side(node: &Iri, position: Position, references: &[Iri]) -> StatementSet {
    let mut graph = StatementSet::new();

    match position {
        Position::Exact(value) => graph.merge(exact(node, value)),
        Position::Fuzzy { begin, end } => {
            graph.insert(node, vocab::rdf_type(), faldo("FuzzyPosition"));
            if let Some(value) = begin {
                let inner = node.fragment("begin");
                graph.insert(node, faldo("begin"), inner.clone());
                graph.merge(exact(&inner, value));
            }
            if let Some(value) = end {
                let inner = node.fragment("end");
                graph.insert(node, faldo("end"), inner.clone());
                graph.merge(exact(&inner, value));
            }
        }
    }

    for reference in references {
        graph.insert(node, faldo("reference"), reference.clone());
    }

    graph
}

fn exact(node: &Iri, value: i64) -> StatementSet {
    let mut graph = StatementSet::new();
    graph.insert(node, vocab::rdf_type(), faldo("ExactPosition"));
    graph.insert(node, faldo("position"), value);
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::mappings::Mappings;
    use crate::models::term::Term;

    fn bounds(lower: Option<i64>, upper: Option<i64>) -> Option<Bounds> {
        Some(Bounds::new(lower, upper))
    }

    #[rstest]
    #[case(100, None, None, Position::Exact(100))]
    #[case(100, bounds(Some(90), Some(110)), None, Position::Fuzzy { begin: Some(90), end: Some(110) })]
    #[case(100, bounds(None, Some(110)), None, Position::Fuzzy { begin: None, end: Some(110) })]
    #[case(100, None, bounds(Some(-10), Some(5)), Position::Fuzzy { begin: Some(90), end: Some(105) })]
    #[case(100, None, bounds(None, None), Position::Fuzzy { begin: None, end: None })]
    #[case(100, bounds(Some(1), None), bounds(Some(-10), Some(5)), Position::Fuzzy { begin: Some(1), end: None })]
    fn test_model(
        #[case] anchor: i64,
        #[case] range: Option<Bounds>,
        #[case] interval: Option<Bounds>,
        #[case] expected: Position,
    ) {
        let position = Position::model(anchor, range, interval).unwrap();
        assert_eq!(position, expected);
        assert!(position.exact_count() <= 2);
    }

    #[rstest]
    #[case(100, bounds(Some(i64::MAX), Some(0)))]
    #[case(-100, bounds(Some(0), Some(i64::MIN)))]
    fn test_model_offset_overflow(#[case] anchor: i64, #[case] interval: Option<Bounds>) {
        assert_eq!(Position::model(anchor, None, interval), None);
        // a range still wins over an interval that would overflow
        assert!(Position::model(anchor, bounds(Some(1), None), interval).is_some());
    }

    #[fixture]
    fn mappings() -> Mappings {
        Mappings::bundled().unwrap()
    }

    fn coords<'a>(chromosome: &'a str, assembly: Option<&'a str>) -> Coordinates<'a> {
        Coordinates {
            chromosome,
            assembly,
            start: 100,
            end: 200,
            start_range: None,
            end_range: None,
            cipos: None,
            ciend: None,
        }
    }

    fn count_type(graph: &StatementSet, class: &str) -> usize {
        let class = Term::Iri(faldo(class));
        graph
            .iter()
            .filter(|t| t.predicate == vocab::rdf_type() && t.object == class)
            .count()
    }

    #[rstest]
    fn test_exact_location_with_resolved_reference(mappings: Mappings) {
        let subject = Iri::new("http://med2rdf.org/dbvar/variant_call/nssv1");
        let graph = location(&subject, &coords("NC_000001.11", Some("GRCh38")), &mappings).unwrap();

        let region = Iri::new("http://med2rdf.org/dbvar/variant_call/nssv1/position/GRCh38/NC_000001.11");
        let begin = region.join("begin");

        assert_eq!(count_type(&graph, "ExactPosition"), 2);
        assert_eq!(count_type(&graph, "FuzzyPosition"), 0);
        assert_eq!(
            graph.objects(&begin, &faldo("position")).collect::<Vec<_>>(),
            vec![&Term::from(100i64)]
        );
        assert_eq!(
            graph.objects(&begin, &faldo("reference")).collect::<Vec<_>>(),
            vec![
                &Term::Iri(Iri::new("http://identifiers.org/hco/1/GRCh38")),
                &Term::Iri(Iri::new("http://identifiers.org/refseq/NC_000001.11")),
            ]
        );
    }

    #[rstest]
    fn test_unresolved_reference_falls_back_to_insdc(mappings: Mappings) {
        let subject = Iri::new("http://med2rdf.org/dbvar/variant_call/nssv1");
        let graph = location(&subject, &coords("CM000663.2", None), &mappings).unwrap();

        let end = Iri::new("http://med2rdf.org/dbvar/variant_call/nssv1/position/unknown/CM000663.2/end");
        assert_eq!(
            graph.objects(&end, &faldo("reference")).collect::<Vec<_>>(),
            vec![&Term::Iri(Iri::new("http://identifiers.org/insdc/CM000663.2"))]
        );
    }

    #[rstest]
    fn test_fuzzy_location(mappings: Mappings) {
        let subject = Iri::new("http://med2rdf.org/dbvar/variant_call/nssv1");
        let mut c = coords("NC_000001.11", Some("GRCh38"));
        c.start_range = bounds(None, Some(95));
        c.ciend = bounds(Some(-5), Some(5));

        let graph = location(&subject, &c, &mappings).unwrap();
        let region = Iri::new("http://med2rdf.org/dbvar/variant_call/nssv1/position/GRCh38/NC_000001.11");

        assert_eq!(count_type(&graph, "FuzzyPosition"), 2);
        assert_eq!(count_type(&graph, "ExactPosition"), 3);

        let begin_end = region.join("begin").fragment("end");
        assert_eq!(
            graph.objects(&begin_end, &faldo("position")).collect::<Vec<_>>(),
            vec![&Term::from(95i64)]
        );
        let end_begin = region.join("end").fragment("begin");
        assert_eq!(
            graph.objects(&end_begin, &faldo("position")).collect::<Vec<_>>(),
            vec![&Term::from(195i64)]
        );
    }

    #[rstest]
    fn test_shared_accession_without_assembly_fails(mappings: Mappings) {
        let subject = Iri::new("http://med2rdf.org/dbvar/variant_call/nssv1");
        let result = location(&subject, &coords("NC_012920.1", None), &mappings);
        assert!(matches!(result, Err(ModelError::Mapping(_))));
    }

    #[rstest]
    fn test_overflowing_interval_is_invalid_attribute(mappings: Mappings) {
        let subject = Iri::new("http://med2rdf.org/dbvar/variant_call/nssv1");
        let mut c = coords("NC_000001.11", Some("GRCh38"));
        c.ciend = bounds(None, Some(i64::MAX));

        match location(&subject, &c, &mappings) {
            Err(ModelError::InvalidAttribute { tag, value }) => {
                assert_eq!(tag, "ciend");
                assert_eq!(value, format!(".,{}", i64::MAX));
            }
            other => panic!("expected an invalid attribute, got {:?}", other),
        }
    }
}
