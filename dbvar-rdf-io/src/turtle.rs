//! Streaming Turtle serialization.
//!
//! Each [`StatementSet`] is written as one self-contained fragment: its
//! statements grouped by subject, then by predicate. The `@prefix` prologue
//! is written once, before the first fragment.

use std::fmt::Write as _;
use std::io::{self, Write};

use dbvar_rdf_core::models::statement_set::StatementSet;
use dbvar_rdf_core::models::term::{Iri, Literal, Term, Triple};
use dbvar_rdf_core::vocab::{self, PREFIXES};

const INDENT: &str = "    ";

///
/// Compacts IRIs against a prefix table and renders terms.
///
#[derive(Debug, Clone)]
pub struct TurtleFormatter {
    prefixes: Vec<(&'static str, &'static str)>,
}

impl Default for TurtleFormatter {
    fn default() -> Self {
        TurtleFormatter::new(PREFIXES)
    }
}

impl TurtleFormatter {
    pub fn new(prefixes: &[(&'static str, &'static str)]) -> Self {
        TurtleFormatter {
            prefixes: prefixes.to_vec(),
        }
    }

    pub fn prologue(&self) -> String {
        let mut out = String::new();
        for (prefix, namespace) in &self.prefixes {
            let _ = writeln!(out, "@prefix {}: <{}> .", prefix, namespace);
        }
        out.push('\n');
        out
    }

    ///
    /// `prefix:local` when a namespace matches and the remainder is a valid
    /// local name, `<iri>` otherwise. The longest namespace wins; on a tie the
    /// later binding wins.
    ///
    pub fn iri(&self, iri: &Iri) -> String {
        let iri = iri.as_str();

        let mut best: Option<(&str, &str)> = None;
        for &(prefix, namespace) in &self.prefixes {
            if iri.starts_with(namespace) && best.is_none_or(|(_, ns)| namespace.len() >= ns.len()) {
                best = Some((prefix, namespace));
            }
        }

        if let Some((prefix, namespace)) = best {
            let local = &iri[namespace.len()..];
            if is_local_name(local) {
                return format!("{}:{}", prefix, local);
            }
        }

        format!("<{}>", escape_iri(iri))
    }

    pub fn literal(&self, literal: &Literal) -> String {
        match literal {
            Literal::String(s) => format!("\"{}\"", escape_string(s)),
            Literal::Integer(i) => i.to_string(),
            Literal::Double(d) => double(*d),
        }
    }

    pub fn term(&self, term: &Term) -> String {
        match term {
            Term::Iri(iri) => self.iri(iri),
            Term::Literal(literal) => self.literal(literal),
        }
    }

    ///
    /// Render a statement set without prologue.
    ///
    pub fn fragment(&self, statements: &StatementSet) -> String {
        let rdf_type = vocab::rdf_type();
        let mut out = String::new();

        for subject in statements.subjects() {
            let triples: Vec<&Triple> = statements.about(subject).collect();

            let mut predicates: Vec<&Iri> = Vec::new();
            for triple in &triples {
                if !predicates.contains(&&triple.predicate) {
                    predicates.push(&triple.predicate);
                }
            }

            out.push_str(&self.iri(subject));
            for (i, predicate) in predicates.iter().enumerate() {
                let objects: Vec<String> = triples
                    .iter()
                    .filter(|t| &&t.predicate == predicate)
                    .map(|t| self.term(&t.object))
                    .collect();

                let verb = match **predicate == rdf_type {
                    true => "a".to_string(),
                    false => self.iri(predicate),
                };

                match i {
                    0 => out.push(' '),
                    _ => {
                        out.push_str(" ;\n");
                        out.push_str(INDENT);
                    }
                }
                out.push_str(&verb);
                out.push(' ');
                out.push_str(&objects.join(", "));
            }
            out.push_str(" .\n\n");
        }

        out
    }
}

///
/// `PN_LOCAL`, restricted to ASCII: letters, digits, `_`, `-`, `:`, `.` (not
/// last) and `%XX` escapes.
///
fn is_local_name(local: &str) -> bool {
    let bytes = local.as_bytes();
    if bytes.last() == Some(&b'.') || bytes.first() == Some(&b'-') || bytes.first() == Some(&b'.') {
        return false;
    }

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let valid = bytes.len() > i + 2
                    && bytes[i + 1].is_ascii_hexdigit()
                    && bytes[i + 2].is_ascii_hexdigit();
                if !valid {
                    return false;
                }
                i += 3;
            }
            b if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b':' | b'.') => i += 1,
            _ => return false,
        }
    }

    true
}

/// Percent-encode the characters IRIREF excludes.
fn escape_iri(iri: &str) -> String {
    let mut out = String::with_capacity(iri.len());
    for c in iri.chars() {
        match c {
            '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => {
                let _ = write!(out, "%{:02X}", c as u32);
            }
            c if (c as u32) <= 0x20 => {
                let _ = write!(out, "%{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

fn double(d: f64) -> String {
    if d.is_nan() {
        return "\"NaN\"^^xsd:double".to_string();
    }
    if d.is_infinite() {
        let inf = if d > 0.0 { "INF" } else { "-INF" };
        return format!("\"{}\"^^xsd:double", inf);
    }
    format!("{:E}", d)
}

///
/// Appends statement sets to a sink as Turtle.
///
pub struct TurtleWriter<W: Write> {
    inner: W,
    formatter: TurtleFormatter,
    header_written: bool,
}

impl<W: Write> TurtleWriter<W> {
    pub fn new(inner: W) -> Self {
        TurtleWriter::with_formatter(inner, TurtleFormatter::default())
    }

    pub fn with_formatter(inner: W, formatter: TurtleFormatter) -> Self {
        TurtleWriter {
            inner,
            formatter,
            header_written: false,
        }
    }

    pub fn header_written(&self) -> bool {
        self.header_written
    }

    ///
    /// Write one statement set, preceded by the prologue on the first call.
    ///
    /// # Returns
    /// - the number of bytes written, prologue included
    pub fn append(&mut self, statements: &StatementSet) -> io::Result<usize> {
        let mut written = 0;

        if !self.header_written {
            let prologue = self.formatter.prologue();
            self.inner.write_all(prologue.as_bytes())?;
            written += prologue.len();
            self.header_written = true;
        }

        let fragment = self.formatter.fragment(statements);
        self.inner.write_all(fragment.as_bytes())?;
        written += fragment.len();

        Ok(written)
    }

    ///
    /// Flush and hand back the sink.
    ///
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn formatter() -> TurtleFormatter {
        TurtleFormatter::default()
    }

    #[rstest]
    #[case("http://identifiers.org/dbsnp/rs5", "dbsnp:rs5")]
    #[case("http://identifiers.org/insdc/chr1", "insdc:chr1")]
    #[case("http://identifiers.org/doid/DOID:12849", "doid:DOID:12849")]
    #[case("http://purl.obolibrary.org/obo/SO_0000159", "obo:SO_0000159")]
    #[case("http://identifiers.org/refseq/NC_000001.11", "refseq:NC_000001.11")]
    #[case("http://identifiers.org/hco/1/GRCh38", "<http://identifiers.org/hco/1/GRCh38>")]
    #[case("http://med2rdf.org/dbvar/variant_call/nssv1/position/GRCh38/NC_000001.11/begin#end", "<http://med2rdf.org/dbvar/variant_call/nssv1/position/GRCh38/NC_000001.11/begin#end>")]
    #[case("http://example.org/x", "<http://example.org/x>")]
    #[case("http://identifiers.org/pubmed/1.", "<http://identifiers.org/pubmed/1.>")]
    fn test_iri(formatter: TurtleFormatter, #[case] iri: &str, #[case] expected: &str) {
        assert_eq!(formatter.iri(&Iri::new(iri)), expected);
    }

    #[rstest]
    #[case(Literal::String("a \"b\"\n".to_string()), "\"a \\\"b\\\"\\n\"")]
    #[case(Literal::Integer(-5), "-5")]
    #[case(Literal::Double(0.5), "5E-1")]
    #[case(Literal::Double(f64::NAN), "\"NaN\"^^xsd:double")]
    fn test_literal(formatter: TurtleFormatter, #[case] literal: Literal, #[case] expected: &str) {
        assert_eq!(formatter.literal(&literal), expected);
    }

    #[rstest]
    #[case("http://example.org/a\tb", "<http://example.org/a%09b>")]
    #[case("http://example.org/{x}|y", "<http://example.org/%7Bx%7D%7Cy>")]
    #[case("http://example.org/a\\b^c`d\"", "<http://example.org/a%5Cb%5Ec%60d%22>")]
    fn test_iri_excluded_characters(formatter: TurtleFormatter, #[case] iri: &str, #[case] expected: &str) {
        assert_eq!(formatter.iri(&Iri::new(iri)), expected);
    }

    #[rstest]
    fn test_iri_escaping(formatter: TurtleFormatter) {
        let iri = Iri::new("http://example.org/a b<c>");
        assert_eq!(formatter.iri(&iri), "<http://example.org/a%20b%3Cc%3E>");
    }

    #[rstest]
    fn test_fragment_groups_by_subject(formatter: TurtleFormatter) {
        let s = Iri::new("http://med2rdf.org/dbvar/variant_call/nssv1");
        let mut set = StatementSet::new();
        set.insert(&s, vocab::rdf_type(), vocab::dbvar("VariantCall"));
        set.insert(&s, vocab::rdf_type(), vocab::obo("SO_0000159"));
        set.insert(&s, vocab::dc("identifier"), "nssv1");

        assert_eq!(
            formatter.fragment(&set),
            "dbvarvc:nssv1 a dbvar:VariantCall, obo:SO_0000159 ;\n    dc:identifier \"nssv1\" .\n\n"
        );
    }

    #[rstest]
    fn test_prologue_written_once() {
        let s = Iri::new("http://med2rdf.org/dbvar/variant_call/nssv1");
        let mut set = StatementSet::new();
        set.insert(&s, vocab::dc("identifier"), "nssv1");

        let mut writer = TurtleWriter::new(Vec::new());
        let first = writer.append(&set).unwrap();
        let second = writer.append(&set).unwrap();
        assert!(writer.header_written());

        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(out.len(), first + second);
        assert_eq!(out.matches("@prefix dbvarvc:").count(), 1);
        assert_eq!(out.matches("@prefix").count(), PREFIXES.len());
        assert!(out.starts_with("@prefix rdf:"));
        assert_eq!(out.matches("dbvarvc:nssv1 dc:identifier \"nssv1\" .").count(), 2);
        assert!(first > second);
    }
}
