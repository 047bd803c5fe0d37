//! Namespaces used in dbVar RDF and the prefix table written to every
//! Turtle document.

use crate::models::term::Iri;

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const DC: &str = "http://purl.org/dc/terms/";

pub const DBVAR: &str = "http://purl.jp/bio/10/dbvar/";
pub const DBVARV: &str = "http://med2rdf.org/dbvar/variation/";
pub const DBVARVC: &str = "http://med2rdf.org/dbvar/variant_call/";
pub const M2R: &str = "http://med2rdf.org/ontology/med2rdf#";
pub const FALDO: &str = "http://biohackathon.org/resource/faldo#";
pub const HCO: &str = "http://identifiers.org/hco/";
pub const OBO: &str = "http://purl.obolibrary.org/obo/";
pub const SIO: &str = "http://semanticscience.org/resource/";

pub const CLINVAR: &str = "http://identifiers.org/clinvar.submission/";
pub const DBSNP: &str = "http://identifiers.org/dbsnp/";
pub const DOID: &str = "http://identifiers.org/doid/";
pub const GENBANK: &str = "http://identifiers.org/insdc/";
pub const INSDC: &str = "http://identifiers.org/insdc/";
pub const MEDGEN: &str = "http://identifiers.org/medgen/";
pub const MESH: &str = "http://identifiers.org/mesh/";
pub const NCBI_GENE: &str = "http://identifiers.org/ncbigene/";
pub const OMIM: &str = "http://identifiers.org/mim/";
pub const ORDO: &str = "http://identifiers.org/orphanet/";
pub const PUBMED: &str = "http://identifiers.org/pubmed/";
pub const REFSEQ: &str = "http://identifiers.org/refseq/";
pub const TAX: &str = "http://identifiers.org/taxonomy/";
pub const HP: &str = "http://identifiers.org/hp/";

///
/// Prefix bindings in declaration order. `genbank` and `insdc` share a
/// namespace; the later binding wins when compacting.
///
pub const PREFIXES: &[(&str, &str)] = &[
    ("rdf", RDF),
    ("owl", OWL),
    ("dc", DC),
    ("rdfs", RDFS),
    ("xsd", XSD),
    ("dbvar", DBVAR),
    ("dbvarv", DBVARV),
    ("dbvarvc", DBVARVC),
    ("m2r", M2R),
    ("clinvar", CLINVAR),
    ("dbsnp", DBSNP),
    ("doid", DOID),
    ("faldo", FALDO),
    ("genbank", GENBANK),
    ("hco", HCO),
    ("insdc", INSDC),
    ("medgen", MEDGEN),
    ("mesh", MESH),
    ("ncbi_gene", NCBI_GENE),
    ("obo", OBO),
    ("omim", OMIM),
    ("ordo", ORDO),
    ("pubmed", PUBMED),
    ("refseq", REFSEQ),
    ("sio", SIO),
    ("tax", TAX),
    ("hp", HP),
];

pub const HOMO_SAPIENS_TAXON: &str = "9606";

fn term(namespace: &str, local: &str) -> Iri {
    Iri::new(format!("{}{}", namespace, local))
}

pub fn rdf(local: &str) -> Iri {
    term(RDF, local)
}

pub fn rdfs(local: &str) -> Iri {
    term(RDFS, local)
}

pub fn owl(local: &str) -> Iri {
    term(OWL, local)
}

pub fn xsd(local: &str) -> Iri {
    term(XSD, local)
}

pub fn dc(local: &str) -> Iri {
    term(DC, local)
}

pub fn dbvar(local: &str) -> Iri {
    term(DBVAR, local)
}

pub fn m2r(local: &str) -> Iri {
    term(M2R, local)
}

pub fn faldo(local: &str) -> Iri {
    term(FALDO, local)
}

pub fn obo(local: &str) -> Iri {
    term(OBO, local)
}

pub fn sio(local: &str) -> Iri {
    term(SIO, local)
}

pub fn hco(local: &str) -> Iri {
    term(HCO, local)
}

pub fn rdf_type() -> Iri {
    rdf("type")
}
