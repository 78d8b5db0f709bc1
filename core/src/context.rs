use crate::persist::{load_inverted_index, load_pagerank, load_stopwords, IndexPaths};
use crate::{normalize, rank, InvertedIndex, LoadResult, PageRank, ScoredResult, Stopwords};

/// Everything a query needs, loaded once at startup and only read afterwards.
#[derive(Debug, Default, Clone)]
pub struct SearchContext {
    pub index: InvertedIndex,
    pub pagerank: PageRank,
    pub stopwords: Stopwords,
}

impl SearchContext {
    pub fn new(index: InvertedIndex, pagerank: PageRank, stopwords: Stopwords) -> Self {
        Self { index, pagerank, stopwords }
    }

    /// Load stopwords, pagerank and the inverted index; the first bad file aborts.
    pub fn load(paths: &IndexPaths) -> LoadResult<Self> {
        let stopwords = load_stopwords(paths)?;
        let pagerank = load_pagerank(paths)?;
        let index = load_inverted_index(paths)?;
        Ok(Self { index, pagerank, stopwords })
    }

    pub fn normalize(&self, text: &str) -> Vec<String> {
        normalize::normalize(text, &self.stopwords)
    }

    pub fn rank(&self, terms: &[String], weight: f64) -> Vec<ScoredResult> {
        rank::rank(&self.index, &self.pagerank, terms, weight)
    }

    /// Normalize `text` and rank it in one step.
    pub fn search(&self, text: &str, weight: f64) -> Vec<ScoredResult> {
        self.rank(&self.normalize(text), weight)
    }
}
