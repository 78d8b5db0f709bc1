use crate::error::{parse_number, LineError, LoadResult};
use crate::persist::for_each_record;
use std::collections::{BTreeSet, HashMap};
use std::io::BufRead;
use std::path::Path;

pub type DocId = u64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_frequency: u32,
    /// Euclidean norm of the document's full tf-idf vector.
    pub document_norm: f64,
}

impl Posting {
    /// The document's normalized tf-idf weight for the term this posting belongs to.
    pub fn normalized_weight(&self, idf: f64) -> f64 {
        self.term_frequency as f64 * idf / self.document_norm
    }
}

/// Per-term record: idf plus the postings in file order.
#[derive(Debug, Clone)]
pub struct TermEntry {
    pub idf: f64,
    postings: Vec<Posting>,
    by_doc: HashMap<DocId, usize>,
}

impl TermEntry {
    /// Build an entry, rejecting a posting list that names a document twice.
    pub fn new(idf: f64, postings: Vec<Posting>) -> Result<Self, LineError> {
        let mut by_doc = HashMap::with_capacity(postings.len());
        for (i, p) in postings.iter().enumerate() {
            if by_doc.insert(p.doc_id, i).is_some() {
                return Err(LineError::DuplicatePosting(p.doc_id));
            }
        }
        Ok(Self { idf, postings, by_doc })
    }

    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    pub fn posting_for(&self, doc_id: DocId) -> Option<&Posting> {
        self.by_doc.get(&doc_id).map(|&i| &self.postings[i])
    }

    pub fn contains(&self, doc_id: DocId) -> bool {
        self.by_doc.contains_key(&doc_id)
    }

    pub fn document_ids(&self) -> BTreeSet<DocId> {
        self.postings.iter().map(|p| p.doc_id).collect()
    }
}

/// Term -> entry mapping. Immutable once built; shared read-only across queries.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    terms: HashMap<String, TermEntry>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Build from (term, entry) pairs. A repeated term is rejected.
    pub fn from_entries<I>(entries: I) -> Result<Self, LineError>
    where
        I: IntoIterator<Item = (String, TermEntry)>,
    {
        let mut terms = HashMap::new();
        for (term, entry) in entries {
            if terms.contains_key(&term) {
                return Err(LineError::DuplicateTerm(term));
            }
            terms.insert(term, entry);
        }
        Ok(Self { terms })
    }

    /// Parse `<term> <idf> (<docid> <tf> <norm>)*` lines. The first malformed line fails the load.
    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> LoadResult<Self> {
        let mut terms: HashMap<String, TermEntry> = HashMap::new();
        for_each_record(reader, path, |line| {
            let (term, entry) = parse_term_line(line)?;
            if terms.contains_key(&term) {
                return Err(LineError::DuplicateTerm(term));
            }
            terms.insert(term, entry);
            Ok(())
        })?;
        Ok(Self { terms })
    }

    pub fn term_entry(&self, term: &str) -> Option<&TermEntry> {
        self.terms.get(term)
    }

    /// Documents containing `term`; empty when the term is unknown.
    pub fn document_ids_for_term(&self, term: &str) -> BTreeSet<DocId> {
        self.term_entry(term).map(TermEntry::document_ids).unwrap_or_default()
    }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub fn num_postings(&self) -> usize {
        self.terms.values().map(|e| e.postings.len()).sum()
    }
}

fn parse_term_line(line: &str) -> Result<(String, TermEntry), LineError> {
    let mut tokens = line.split_whitespace();
    let term = tokens.next().ok_or(LineError::MissingIdf)?;
    let idf: f64 = parse_number("idf", tokens.next().ok_or(LineError::MissingIdf)?)?;
    if !idf.is_finite() || idf < 0.0 {
        return Err(LineError::InvalidIdf(idf));
    }

    let rest: Vec<&str> = tokens.collect();
    let mut postings = Vec::with_capacity(rest.len() / 3);
    for group in rest.chunks(3) {
        let [doc, tf, norm] = group else {
            return Err(LineError::IncompletePosting { found: group.len() });
        };
        let document_norm: f64 = parse_number("norm", norm)?;
        if !document_norm.is_finite() || document_norm <= 0.0 {
            return Err(LineError::InvalidNorm(document_norm));
        }
        postings.push(Posting {
            doc_id: parse_number("docid", doc)?,
            term_frequency: parse_number("tf", tf)?,
            document_norm,
        });
    }
    Ok((term.to_string(), TermEntry::new(idf, postings)?))
}
