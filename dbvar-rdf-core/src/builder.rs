//! Statement production for a [`Variant`].

use log::debug;

use crate::diagnostics::{DropObserver, DropReason, DropSite, NoopObserver};
use crate::errors::ModelResult;
use crate::mappings::LookupResolver;
use crate::models::statement_set::StatementSet;
use crate::models::term::{Iri, Literal};
use crate::models::variant::{EntityKind, Required, Variant};
use crate::position::{self, Coordinates};
use crate::vocab::{self, dc, dbvar, m2r, obo, rdfs, sio};
use crate::xref::{self, Resolution};

impl Variant {
    ///
    /// The statements describing this variant.
    ///
    /// The set is built on the first call and cached; later calls return the
    /// cached set unchanged, whatever resolver they pass.
    ///
    /// # Errors
    /// - [`ModelError::Validation`](crate::errors::ModelError::Validation)
    ///   when a required field is missing. Nothing is cached.
    /// - [`ModelError::Mapping`](crate::errors::ModelError::Mapping) when the
    ///   reference sequence can not be resolved without a build.
    ///
    pub fn statements<R: LookupResolver + ?Sized>(&self, resolver: &R) -> ModelResult<&StatementSet> {
        self.statements_observed(resolver, &mut NoopObserver)
    }

    ///
    /// Like [`Variant::statements`], reporting every dropped cross-reference,
    /// phenotype and parent to `observer`. Drops are only reported by the call
    /// that builds the set.
    ///
    pub fn statements_observed<R, O>(&self, resolver: &R, observer: &mut O) -> ModelResult<&StatementSet>
    where
        R: LookupResolver + ?Sized,
        O: DropObserver + ?Sized,
    {
        if let Some(statements) = self.statements.get() {
            return Ok(statements);
        }

        let built = self.build(resolver, observer)?;
        Ok(self.statements.get_or_init(|| built))
    }

    fn build<R, O>(&self, resolver: &R, observer: &mut O) -> ModelResult<StatementSet>
    where
        R: LookupResolver + ?Sized,
        O: DropObserver + ?Sized,
    {
        let required = self.validate()?;
        let kind = self.kind.unwrap_or(EntityKind::VariantCall);
        let subject = kind.base().join(required.id);

        let mut graph = self.description(&subject, kind, &required, resolver);
        graph.merge(self.parents(&subject, observer));
        graph.merge(self.annotations(&subject));
        graph.merge(self.frequencies(&subject));

        let coords = Coordinates {
            chromosome: required.chromosome,
            assembly: self.reference.as_deref(),
            start: required.start,
            end: required.end,
            start_range: self.start_range,
            end_range: self.end_range,
            cipos: self.cipos,
            ciend: self.ciend,
        };
        graph.merge(position::location(&subject, &coords, resolver)?);

        graph.merge(self.cross_reference_links(&subject, observer));
        graph.merge(self.disease_links(&subject, observer));

        Ok(graph)
    }

    fn description<R: LookupResolver + ?Sized>(
        &self,
        subject: &Iri,
        kind: EntityKind,
        required: &Required,
        resolver: &R,
    ) -> StatementSet {
        let mut graph = StatementSet::new();

        graph.insert(subject, vocab::rdf_type(), kind.class());
        match resolver.variant_class(required.variation_class) {
            Some(so) => graph.insert(subject, vocab::rdf_type(), so),
            None => debug!("No SO term for variant type `{}`", required.variation_class),
        }
        graph.insert(subject, dc("identifier"), required.id);
        graph.insert(
            subject,
            obo("RO_0002162"),
            Iri::new(vocab::TAX).join(vocab::HOMO_SAPIENS_TAXON),
        );

        if let Some(v) = &self.alternative_allele {
            graph.insert(subject, m2r("alternative_allele"), v.as_str());
        }
        if let Some(v) = &self.reference_allele {
            graph.insert(subject, m2r("reference_allele"), v.as_str());
        }
        if let Some(v) = &self.zygosity {
            graph.insert(subject, m2r("zygosity"), v.as_str());
        }

        graph
    }

    fn parents<O: DropObserver + ?Sized>(&self, subject: &Iri, observer: &mut O) -> StatementSet {
        let mut graph = StatementSet::new();
        for parent in &self.parents {
            match xref::parent(parent) {
                Some(region) => graph.insert(subject, dc("isPartOf"), region),
                None => observer.dropped(DropSite::Parent, DropReason::Unmatched, "parent", parent),
            }
        }
        graph
    }

    fn annotations(&self, subject: &Iri) -> StatementSet {
        let mut graph = StatementSet::new();
        for v in &self.clinical_significance {
            graph.insert(subject, m2r("clinical_significance"), v.as_str());
        }
        for v in &self.phenotype_names {
            graph.insert(subject, m2r("phenotype"), v.as_str());
        }
        graph
    }

    fn frequencies(&self, subject: &Iri) -> StatementSet {
        let mut graph = StatementSet::new();

        let nodes = [
            ("frequency", "Frequency", self.allele_frequency.map(Literal::Double)),
            ("allele_count", "AlleleCount", self.allele_count.map(Literal::Integer)),
            ("allele_total", "AlleleTotal", self.allele_number.map(Literal::Integer)),
        ];

        for (segment, class, value) in nodes {
            if let Some(value) = value {
                let node = subject.join(segment);
                graph.insert(subject, sio("SIO_000216"), node.clone());
                graph.insert(&node, vocab::rdf_type(), dbvar(class));
                graph.insert(&node, vocab::rdf("value"), value);
            }
        }

        graph
    }

    fn cross_reference_links<O: DropObserver + ?Sized>(&self, subject: &Iri, observer: &mut O) -> StatementSet {
        let mut graph = StatementSet::new();
        for (source, id) in &self.cross_references {
            match xref::cross_reference(source, id) {
                Resolution::Resolved(iri) => graph.insert(subject, rdfs("seeAlso"), iri),
                Resolution::Dropped(reason) => observer.dropped(DropSite::CrossReference, reason, source, id),
            }
        }
        graph
    }

    fn disease_links<O: DropObserver + ?Sized>(&self, subject: &Iri, observer: &mut O) -> StatementSet {
        let mut graph = StatementSet::new();
        for (source, id) in &self.phenotypes {
            match xref::phenotype(source, id) {
                Resolution::Resolved(iri) => graph.insert(subject, m2r("disease"), iri),
                Resolution::Dropped(reason) => observer.dropped(DropSite::Phenotype, reason, source, id),
            }
        }
        graph
    }
}
