use crate::error::{LineError, LoadError, LoadResult};
use crate::{InvertedIndex, PageRank, Stopwords};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Locations of the three files produced by the offline pipeline.
///
/// Layout under `root`:
/// `stopwords.txt`, `pagerank.out`, `inverted_index/inverted_index_<segment>.txt`.
#[derive(Debug, Clone)]
pub struct IndexPaths {
    pub root: PathBuf,
    pub segment: String,
    index_file: Option<PathBuf>,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf(), segment: "0".to_string(), index_file: None }
    }

    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = segment.into();
        self
    }

    /// Use an explicit inverted index file instead of the segment-derived one.
    pub fn with_index_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.index_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn stopwords(&self) -> PathBuf { self.root.join("stopwords.txt") }
    pub fn pagerank(&self) -> PathBuf { self.root.join("pagerank.out") }
    pub fn inverted_index(&self) -> PathBuf {
        match &self.index_file {
            Some(p) => p.clone(),
            None => self.root.join("inverted_index").join(format!("inverted_index_{}.txt", self.segment)),
        }
    }
}

/// Feed every non-blank line to `parse`, tagging failures with path and 1-based line number.
pub(crate) fn for_each_record<R, F>(reader: R, path: &Path, mut parse: F) -> LoadResult<()>
where
    R: BufRead,
    F: FnMut(&str) -> Result<(), LineError>,
{
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        if line.trim().is_empty() { continue; }
        parse(&line).map_err(|source| LoadError::Malformed { path: path.to_path_buf(), line: i + 1, source })?;
    }
    Ok(())
}

fn open(path: &Path) -> LoadResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })
}

pub fn load_stopwords(paths: &IndexPaths) -> LoadResult<Stopwords> {
    let path = paths.stopwords();
    let stopwords = Stopwords::from_reader(open(&path)?, &path)?;
    tracing::info!(path = %path.display(), count = stopwords.len(), "loaded stopwords");
    Ok(stopwords)
}

pub fn load_pagerank(paths: &IndexPaths) -> LoadResult<PageRank> {
    let path = paths.pagerank();
    let pagerank = PageRank::from_reader(open(&path)?, &path)?;
    tracing::info!(path = %path.display(), documents = pagerank.len(), "loaded pagerank");
    Ok(pagerank)
}

pub fn load_inverted_index(paths: &IndexPaths) -> LoadResult<InvertedIndex> {
    let path = paths.inverted_index();
    let index = InvertedIndex::from_reader(open(&path)?, &path)?;
    tracing::info!(path = %path.display(), terms = index.len(), postings = index.num_postings(), "loaded inverted index");
    Ok(index)
}
