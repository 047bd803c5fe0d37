use crate::models::term::{Iri, Term, Triple};

///
/// StatementSet struct, the statements produced for one entity
/// (including its position and frequency sub-nodes), in insertion order.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatementSet {
    pub triples: Vec<Triple>,
}

impl StatementSet {
    pub fn new() -> Self {
        StatementSet::default()
    }

    pub fn insert<O: Into<Term>>(&mut self, subject: &Iri, predicate: Iri, object: O) {
        self.triples
            .push(Triple::new(subject.clone(), predicate, object));
    }

    pub fn push(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Move every statement of `other` to the end of this set.
    pub fn merge(&mut self, other: StatementSet) {
        self.triples.extend(other.triples);
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triple> {
        self.triples.iter()
    }

    ///
    /// All statements about `subject`.
    ///
    pub fn about<'a>(&'a self, subject: &'a Iri) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |t| &t.subject == subject)
    }

    ///
    /// Objects of `(subject, predicate, ?)`.
    ///
    pub fn objects<'a>(
        &'a self,
        subject: &'a Iri,
        predicate: &'a Iri,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.about(subject)
            .filter(move |t| &t.predicate == predicate)
            .map(|t| &t.object)
    }

    ///
    /// Subjects in order of first appearance.
    ///
    pub fn subjects(&self) -> Vec<&Iri> {
        let mut seen: Vec<&Iri> = Vec::new();
        for triple in &self.triples {
            if !seen.contains(&&triple.subject) {
                seen.push(&triple.subject);
            }
        }
        seen
    }
}

impl From<Vec<Triple>> for StatementSet {
    fn from(triples: Vec<Triple>) -> Self {
        StatementSet { triples }
    }
}

impl<'a> IntoIterator for &'a StatementSet {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
