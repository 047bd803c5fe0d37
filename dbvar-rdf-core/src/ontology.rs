//! The dbVar ontology: the classes and properties used in dbVar RDF that no
//! imported vocabulary defines.

use crate::models::statement_set::StatementSet;
use crate::models::term::Iri;
use crate::vocab::{self, dbvar, dc, m2r, owl, rdfs, xsd};

pub const TITLE: &str = "dbVar Ontology";
pub const DESCRIPTION: &str = "dbVar Ontology describes classes and properties which is used in dbVar RDF";

struct Class {
    name: &'static str,
    parent: Option<&'static str>,
}

struct Property {
    name: &'static str,
    comment: Option<&'static str>,
}

const CLASSES: &[Class] = &[
    Class {
        name: "VariantCall",
        parent: Some("Variation"),
    },
    Class {
        name: "VariantRegion",
        parent: Some("Variation"),
    },
    Class {
        name: "Frequency",
        parent: None,
    },
    Class {
        name: "AlleleCount",
        parent: None,
    },
    Class {
        name: "AlleleTotal",
        parent: None,
    },
];

const PROPERTIES: &[Property] = &[
    Property {
        name: "clinical_significance",
        comment: None,
    },
    Property {
        name: "phenotype",
        comment: None,
    },
    Property {
        name: "zygosity",
        comment: Some("The zygosity of this locus where zygosity is heterozygous, homozygous or hemizygous."),
    },
];

///
/// Build the ontology graph.
///
pub fn statements() -> StatementSet {
    let ontology = Iri::new(vocab::DBVAR);
    let mut graph = StatementSet::new();

    graph.insert(&ontology, vocab::rdf_type(), owl("Ontology"));
    graph.insert(&ontology, dc("title"), TITLE);
    graph.insert(&ontology, dc("description"), DESCRIPTION);
    for import in [vocab::DC, vocab::FALDO, vocab::OBO, vocab::M2R] {
        graph.insert(&ontology, owl("imports"), Iri::new(import));
    }

    for class in CLASSES {
        let term = dbvar(class.name);
        graph.insert(&term, vocab::rdf_type(), owl("Class"));
        if let Some(parent) = class.parent {
            graph.insert(&term, rdfs("subClassOf"), m2r(parent));
        }
        graph.insert(&term, rdfs("isDefinedBy"), ontology.clone());
        graph.insert(&term, rdfs("label"), class.name);
    }

    for property in PROPERTIES {
        let term = dbvar(property.name);
        graph.insert(&term, vocab::rdf_type(), owl("DatatypeProperty"));
        graph.insert(&term, rdfs("label"), property.name);
        graph.insert(&term, rdfs("domain"), m2r("Variation"));
        graph.insert(&term, rdfs("range"), xsd("string"));
        graph.insert(&term, rdfs("isDefinedBy"), ontology.clone());
        if let Some(comment) = property.comment {
            graph.insert(&term, rdfs("comment"), comment);
        }
    }

    graph
}
