use crate::error::{LineError, LoadResult};
use crate::persist::for_each_record;
use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

/// Terms dropped from both documents and queries.
#[derive(Debug, Default, Clone)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// One term per line, surrounding whitespace ignored.
    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> LoadResult<Self> {
        let mut words = HashSet::new();
        for_each_record(reader, path, |line| {
            let word = line.trim();
            if word.contains(char::is_whitespace) {
                return Err(LineError::SpacedStopword(word.to_string()));
            }
            words.insert(word.to_string());
            Ok(())
        })?;
        Ok(Self { words })
    }

    pub fn contains(&self, term: &str) -> bool { self.words.contains(term) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

impl<S: Into<String>> FromIterator<S> for Stopwords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { words: iter.into_iter().map(Into::into).collect() }
    }
}
