use crate::error::{parse_number, LineError, LoadResult};
use crate::persist::for_each_record;
use crate::DocId;
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

/// Precomputed authority score per document.
#[derive(Debug, Default, Clone)]
pub struct PageRank {
    scores: HashMap<DocId, f64>,
}

impl PageRank {
    /// Parse `<docid>,<score>` lines. A repeated document id keeps the last score.
    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> LoadResult<Self> {
        let mut scores = HashMap::new();
        for_each_record(reader, path, |line| {
            let (doc_id, score) = parse_pagerank_line(line)?;
            if let Some(prev) = scores.insert(doc_id, score) {
                tracing::debug!(doc_id, prev, score, "duplicate pagerank entry, keeping last");
            }
            Ok(())
        })?;
        Ok(Self { scores })
    }

    /// Authority of `doc_id`, 0.0 when the document has no entry.
    pub fn score_for(&self, doc_id: DocId) -> f64 {
        self.scores.get(&doc_id).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize { self.scores.len() }

    pub fn is_empty(&self) -> bool { self.scores.is_empty() }
}

impl FromIterator<(DocId, f64)> for PageRank {
    fn from_iter<I: IntoIterator<Item = (DocId, f64)>>(iter: I) -> Self {
        Self { scores: iter.into_iter().collect() }
    }
}

fn parse_pagerank_line(line: &str) -> Result<(DocId, f64), LineError> {
    let (doc, score) = line.trim().split_once(',').ok_or(LineError::MissingComma)?;
    let doc_id = parse_number("docid", doc.trim())?;
    let score: f64 = parse_number("score", score.trim())?;
    if !score.is_finite() || score < 0.0 {
        return Err(LineError::InvalidScore(score));
    }
    Ok((doc_id, score))
}
