//! Synonyms, antonyms and part-of-speech membership derived from lookups.

use crate::error::Result;
use crate::models::{Category, SenseRecord, SynonymSet};
use crate::WordNet;
use log::debug;

impl WordNet {
    /// One [`SynonymSet`] per sense found for `word`.
    ///
    /// `close` holds the other words of the sense. `far` holds the words of
    /// the senses listed as `similar`, which only adjectives carry. `word`
    /// itself never appears in either list.
    pub fn synonyms(&self, word: &str, category: Option<Category>) -> Result<Vec<SynonymSet>> {
        self.lookup(word, category)
            .into_iter()
            .map(|record| -> Result<SynonymSet> {
                let far = if record.syntactic_category == Category::Adjective {
                    let mut far = Vec::new();
                    for id in &record.similar {
                        let similar = self.resolve(id)?;
                        far.extend(similar.words.iter().filter(|w| *w != word).cloned());
                    }
                    far
                } else {
                    Vec::new()
                };
                Ok(SynonymSet {
                    synset: record.id.clone(),
                    close: other_words(record, word),
                    far,
                })
            })
            .collect()
    }

    /// Senses opposed to the adjective senses of `word`.
    ///
    /// Antonym ids are deduplicated in first-seen order and resolved as sense
    /// ids, so `category` does not change the result, the same as for an id
    /// passed to [`WordNet::lookup`]. A value that is not a sense id, or names
    /// no record, fails the whole call with `NotFound`.
    pub fn antonyms(&self, word: &str, _category: Option<Category>) -> Result<Vec<&SenseRecord>> {
        let mut ids: Vec<&str> = Vec::new();
        for record in self.adjective(word) {
            for id in &record.antonyms {
                if !ids.contains(&id.as_str()) {
                    ids.push(id);
                }
            }
        }
        debug!("antonyms: '{}' has antonym ids {:?}", word, ids);

        ids.into_iter()
            .map(|id| self.resolve(id))
            .collect()
    }

    /// Categories `word` belongs to, in unscoped search order.
    pub fn pos(&self, word: &str) -> Vec<Category> {
        let mut categories = Vec::new();
        for record in self.lookup(word, None) {
            if !categories.contains(&record.syntactic_category) {
                categories.push(record.syntactic_category);
            }
        }
        categories
    }
}

fn other_words(record: &SenseRecord, word: &str) -> Vec<String> {
    record
        .words
        .iter()
        .filter(|w| *w != word)
        .cloned()
        .collect()
}
