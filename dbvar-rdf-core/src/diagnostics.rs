//! Reporting of identifiers dropped while building statements.
//!
//! Cross-references, phenotypes and parents that can not be turned into an
//! IRI are skipped without an error. An observer sees every skip; it never
//! changes the statements produced.

use std::collections::HashMap;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DropSite {
    CrossReference,
    Phenotype,
    Parent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DropReason {
    /// The source label has no rule at all.
    UnknownSource,
    /// The source label is known and deliberately produces nothing (e.g. `URL`).
    Suppressed,
    /// The source label is known but the identifier matched none of its patterns.
    Unmatched,
}

impl Display for DropSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropSite::CrossReference => write!(f, "cross-reference"),
            DropSite::Phenotype => write!(f, "phenotype"),
            DropSite::Parent => write!(f, "parent"),
        }
    }
}

impl Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::UnknownSource => write!(f, "unknown source"),
            DropReason::Suppressed => write!(f, "suppressed"),
            DropReason::Unmatched => write!(f, "unmatched"),
        }
    }
}

pub trait DropObserver {
    fn dropped(&mut self, site: DropSite, reason: DropReason, source: &str, id: &str);
}

/// Ignores every drop.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DropObserver for NoopObserver {
    fn dropped(&mut self, _site: DropSite, _reason: DropReason, _source: &str, _id: &str) {}
}

///
/// Counts drops per (site, reason), and per source label so a run can report
/// which databases it did not know.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropCounter {
    counts: HashMap<(DropSite, DropReason), usize>,
    sources: HashMap<(DropSite, String), usize>,
}

impl DropCounter {
    pub fn new() -> Self {
        DropCounter::default()
    }

    pub fn count(&self, site: DropSite, reason: DropReason) -> usize {
        self.counts.get(&(site, reason)).copied().unwrap_or(0)
    }

    pub fn count_source(&self, site: DropSite, source: &str) -> usize {
        self.sources
            .get(&(site, source.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    ///
    /// Counts in a stable order, for reporting.
    ///
    pub fn summary(&self) -> Vec<(DropSite, DropReason, usize)> {
        let mut rows: Vec<_> = self
            .counts
            .iter()
            .map(|(&(site, reason), &n)| (site, reason, n))
            .collect();
        rows.sort();
        rows
    }
}

impl DropObserver for DropCounter {
    fn dropped(&mut self, site: DropSite, reason: DropReason, source: &str, _id: &str) {
        *self.counts.entry((site, reason)).or_insert(0) += 1;
        *self.sources.entry((site, source.to_string())).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_counter() {
        let mut counter = DropCounter::new();
        counter.dropped(DropSite::CrossReference, DropReason::Suppressed, "URL", "http://x");
        counter.dropped(DropSite::CrossReference, DropReason::Suppressed, "URL", "http://y");
        counter.dropped(DropSite::Phenotype, DropReason::UnknownSource, "Foo", "1");

        assert_eq!(counter.count(DropSite::CrossReference, DropReason::Suppressed), 2);
        assert_eq!(counter.count(DropSite::Phenotype, DropReason::Unmatched), 0);
        assert_eq!(counter.count_source(DropSite::CrossReference, "URL"), 2);
        assert_eq!(counter.total(), 3);
        assert_eq!(
            counter.summary(),
            vec![
                (DropSite::CrossReference, DropReason::Suppressed, 2),
                (DropSite::Phenotype, DropReason::UnknownSource, 1),
            ]
        );
    }
}
