use std::fmt::{self, Display};

///
/// An absolute IRI.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, PartialOrd, Ord)]
pub struct Iri(String);

impl Iri {
    pub fn new<S: Into<String>>(iri: S) -> Self {
        Iri(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    ///
    /// Append a path segment, inserting a `/` unless the IRI already ends
    /// with a separator (`/` or `#`).
    ///
    pub fn join(&self, segment: &str) -> Iri {
        if self.0.ends_with('/') || self.0.ends_with('#') {
            Iri(format!("{}{}", self.0, segment))
        } else {
            Iri(format!("{}/{}", self.0, segment))
        }
    }

    ///
    /// Attach a fragment identifier, e.g. `pos.fragment("begin")` gives `<pos>#begin`.
    ///
    pub fn fragment(&self, fragment: &str) -> Iri {
        Iri(format!("{}#{}", self.0, fragment))
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Iri::new(value)
    }
}

///
/// Literal objects. Integers map to `xsd:integer`, doubles to `xsd:double`.
///
#[derive(PartialEq, Debug, Clone)]
pub enum Literal {
    String(String),
    Integer(i64),
    Double(f64),
}

#[derive(PartialEq, Debug, Clone)]
pub enum Term {
    Iri(Iri),
    Literal(Literal),
}

impl From<Iri> for Term {
    fn from(value: Iri) -> Self {
        Term::Iri(value)
    }
}

impl From<Literal> for Term {
    fn from(value: Literal) -> Self {
        Term::Literal(value)
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Term::Literal(Literal::String(value.to_string()))
    }
}

impl From<String> for Term {
    fn from(value: String) -> Self {
        Term::Literal(Literal::String(value))
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::Literal(Literal::Integer(value))
    }
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Term::Literal(Literal::Double(value))
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct Triple {
    pub subject: Iri,
    pub predicate: Iri,
    pub object: Term,
}

impl Triple {
    pub fn new<O: Into<Term>>(subject: Iri, predicate: Iri, object: O) -> Self {
        Triple {
            subject,
            predicate,
            object: object.into(),
        }
    }
}
