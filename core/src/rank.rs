use crate::{DocId, InvertedIndex, PageRank, TermEntry};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

pub const DEFAULT_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredResult {
    #[serde(rename = "docid")]
    pub document_id: DocId,
    pub score: f64,
}

/// Rank documents containing every query term.
///
/// Each candidate scores `weight * pagerank + (1 - weight) * cosine`, where
/// `cosine` compares the tf-idf query vector with the document's normalized
/// tf-idf weights. `weight` is applied as given, without clamping. Results are
/// ordered by descending score, ties by ascending document id.
pub fn rank(index: &InvertedIndex, pagerank: &PageRank, terms: &[String], weight: f64) -> Vec<ScoredResult> {
    let query = match QueryVector::build(index, terms) {
        Some(q) => q,
        None => return Vec::new(),
    };

    let candidates = query.candidates();
    let mut results: Vec<ScoredResult> = candidates
        .into_iter()
        .map(|doc_id| {
            let cosine = query.cosine(doc_id);
            let score = weight * pagerank.score_for(doc_id) + (1.0 - weight) * cosine;
            ScoredResult { document_id: doc_id, score }
        })
        .collect();

    results.sort_by(compare_results);
    results
}

/// Descending score, then ascending document id.
fn compare_results(a: &ScoredResult, b: &ScoredResult) -> Ordering {
    b.score.total_cmp(&a.score).then(a.document_id.cmp(&b.document_id))
}

/// Unit-length query vector over the distinct query terms, in first-seen order.
struct QueryVector<'a> {
    components: Vec<(&'a TermEntry, f64)>,
}

impl<'a> QueryVector<'a> {
    /// `None` when the query is empty or any term is missing from the index.
    fn build(index: &'a InvertedIndex, terms: &[String]) -> Option<Self> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for term in terms {
            let count = counts.entry(term.as_str()).or_insert(0);
            if *count == 0 {
                order.push(term.as_str());
            }
            *count += 1;
        }
        if order.is_empty() {
            return None;
        }

        let mut components = Vec::with_capacity(order.len());
        for term in order {
            let entry = index.term_entry(term)?;
            components.push((entry, counts[term] as f64 * entry.idf));
        }

        let norm = components.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        for (_, w) in components.iter_mut() {
            *w = if norm > 0.0 { *w / norm } else { 0.0 };
        }
        Some(Self { components })
    }

    /// Intersection of every term's posting documents.
    fn candidates(&self) -> BTreeSet<DocId> {
        let mut terms = self.components.iter().map(|(entry, _)| *entry);
        let mut docs = match terms.next() {
            Some(first) => first.document_ids(),
            None => return BTreeSet::new(),
        };
        for entry in terms {
            docs.retain(|&d| entry.contains(d));
            if docs.is_empty() {
                break;
            }
        }
        docs
    }

    fn cosine(&self, doc_id: DocId) -> f64 {
        self.components
            .iter()
            .map(|(entry, q)| match entry.posting_for(doc_id) {
                Some(p) => q * p.normalized_weight(entry.idf),
                None => 0.0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Posting;

    fn posting(doc_id: DocId, term_frequency: u32, document_norm: f64) -> Posting {
        Posting { doc_id, term_frequency, document_norm }
    }

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn index_with(entries: Vec<(&str, f64, Vec<Posting>)>) -> InvertedIndex {
        InvertedIndex::from_entries(
            entries
                .into_iter()
                .map(|(t, idf, p)| (t.to_string(), TermEntry::new(idf, p).unwrap())),
        )
        .unwrap()
    }

    #[test]
    fn repeated_query_term_changes_query_vector() {
        let index = index_with(vec![
            ("a", 1.0, vec![posting(1, 1, 2.0)]),
            ("b", 1.0, vec![posting(1, 1, 2.0)]),
        ]);
        let pr = PageRank::default();
        let once = rank(&index, &pr, &terms(&["a", "b"]), 0.0);
        let twice = rank(&index, &pr, &terms(&["a", "a", "b"]), 0.0);
        // [1,1]/sqrt2 . [0.5,0.5] vs [2,1]/sqrt5 . [0.5,0.5]
        assert!((once[0].score - 1.0 / 2f64.sqrt()).abs() < 1e-12);
        assert!((twice[0].score - 1.5 / 5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn zero_idf_does_not_divide_by_zero() {
        let index = index_with(vec![("common", 0.0, vec![posting(3, 4, 1.0)])]);
        let pr: PageRank = [(3, 0.4)].into_iter().collect();
        let results = rank(&index, &pr, &terms(&["common"]), 0.5);
        assert_eq!(results, vec![ScoredResult { document_id: 3, score: 0.2 }]);
    }

    #[test]
    fn ties_break_on_document_id() {
        let index = index_with(vec![(
            "x",
            1.0,
            vec![posting(9, 1, 1.0), posting(2, 1, 1.0), posting(5, 1, 1.0)],
        )]);
        let results = rank(&index, &PageRank::default(), &terms(&["x"]), 0.5);
        let ids: Vec<DocId> = results.iter().map(|r| r.document_id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn weight_is_not_clamped() {
        let index = index_with(vec![("x", 1.0, vec![posting(1, 1, 1.0)])]);
        let pr: PageRank = [(1, 0.5)].into_iter().collect();
        let results = rank(&index, &pr, &terms(&["x"]), 2.0);
        // 2.0 * 0.5 + (1 - 2.0) * 1.0
        assert!((results[0].score - 0.0).abs() < 1e-12);
    }

    #[test]
    fn disjoint_terms_short_circuit() {
        let index = index_with(vec![
            ("a", 1.0, vec![posting(1, 1, 1.0)]),
            ("b", 1.0, vec![posting(2, 1, 1.0)]),
            ("c", 1.0, vec![posting(1, 1, 1.0), posting(2, 1, 1.0)]),
        ]);
        assert!(rank(&index, &PageRank::default(), &terms(&["a", "b", "c"]), 0.5).is_empty());
    }

    #[test]
    fn serializes_with_docid_key() {
        let json = serde_json::to_value(ScoredResult { document_id: 7, score: 0.25 }).unwrap();
        assert_eq!(json, serde_json::json!({ "docid": 7, "score": 0.25 }));
    }
}
