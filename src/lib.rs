//! Query library over a bundled, part-of-speech partitioned WordNet dataset.
//!
//! ```no_run
//! use wordnet_lite::{Category, WordNet};
//!
//! # tokio_test::block_on(async {
//! let wn = WordNet::load().await?;
//! for record in wn.lookup("bitter", Some(Category::Adjective)) {
//!     println!("{}: {}", record.id, record.description);
//! }
//! println!("{:?}", wn.pos("bitter"));
//! # Ok::<(), wordnet_lite::WordNetError>(())
//! # });
//! ```

// Declare modules
pub mod data;
pub mod dataset;
pub mod error;
pub mod models;
pub mod parse;
pub mod progress;
mod relations;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export key types for easier use
pub use dataset::Dataset;
pub use error::{Result, WordNetError};
pub use models::{Category, SenseRecord, SynonymSet, sense_id_category};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use log::{debug, info, warn};
use progress::{ProgressCallback, ProgressReporter, reporter_from_callback};
use rand::Rng;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Instant;
use tokio::sync::OnceCell;

/// Options for loading WordNet data.
#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    /// Directory holding (or receiving) the unpacked `<category>.json` tables.
    /// If None, the default location based on ProjectDirs will be used.
    pub data_dir: Option<PathBuf>,
    /// ZIP bundle to unpack when tables are missing.
    /// If None, `data.zip` inside the data directory is used when present.
    pub archive_path: Option<PathBuf>,
    /// Base URL serving `<category>.json`, used when no local source is left.
    pub base_url: Option<String>,
    /// Discard unpacked tables and acquire them again.
    pub force_reload: bool,
}

struct Inner {
    dataset: Dataset,
    vocabulary: OnceLock<Vec<String>>,
}

/// The main WordNet interface.
///
/// Clone is cheap: clones share the tables and the cached vocabulary.
#[derive(Clone)]
pub struct WordNet {
    inner: Arc<Inner>,
}

impl WordNet {
    /// Wraps an already loaded dataset.
    pub fn from_dataset(dataset: Dataset) -> Self {
        WordNet {
            inner: Arc::new(Inner {
                dataset,
                vocabulary: OnceLock::new(),
            }),
        }
    }

    /// Loads the WordNet data using default options (automatic data directory).
    ///
    /// Ensures data is unpacked/downloaded if needed.
    pub async fn load() -> Result<Self> {
        Self::load_with_options(LoadOptions::default(), None).await
    }

    /// Loads the WordNet data with specific options.
    pub async fn load_with_options(
        options: LoadOptions,
        progress_callback: Option<ProgressCallback>,
    ) -> Result<Self> {
        Self::load_with_reporter(options, progress_callback.map(reporter_from_callback)).await
    }

    async fn load_with_reporter(
        options: LoadOptions,
        reporter: Option<ProgressReporter>,
    ) -> Result<Self> {
        let start_time = Instant::now();

        // 1. Make sure the four tables are on disk
        let data_dir = data::ensure_data(&options, reporter).await?;
        info!("Sense tables available in: {:?}", data_dir);

        // 2. Parse them into memory
        let dataset = Dataset::from_dir(&data_dir).await?;

        info!("WordNet loaded in {:.2?}", start_time.elapsed());
        Ok(Self::from_dataset(dataset))
    }

    /// Gets the default directory for the unpacked tables.
    pub fn get_default_data_dir() -> Result<PathBuf> {
        data::get_default_data_dir()
    }

    /// Clears the unpacked tables.
    ///
    /// If `data_dir_override` is `None`, the default data directory is used.
    /// Missing files are not an error.
    pub fn clear_data(data_dir_override: Option<PathBuf>) -> Result<()> {
        let dir = match data_dir_override {
            Some(dir) => dir,
            None => Self::get_default_data_dir()?,
        };
        if !dir.exists() {
            info!("Data directory not found, nothing to clear: {:?}", dir);
            return Ok(());
        }
        let removed = data::clear_tables(&dir)?;
        info!("Removed {} unpacked tables from {:?}", removed, dir);
        Ok(())
    }

    /// The underlying tables.
    pub fn dataset(&self) -> &Dataset {
        &self.inner.dataset
    }

    /// Every record of one category.
    pub fn table(&self, category: Category) -> &[SenseRecord] {
        self.inner.dataset.table(category)
    }

    // --- Query Methods ---

    /// Looks up sense records by word or by sense id.
    ///
    /// A query shaped like a sense id (`bitter.adjective.01`) is always
    /// resolved as an id, whatever `category` says. Otherwise records whose
    /// `words` contain `query` exactly are returned, from `category` only or
    /// from adverbs, adjectives, verbs and nouns in that order. An empty
    /// query with a category returns the whole table.
    pub fn lookup(&self, query: &str, category: Option<Category>) -> Vec<&SenseRecord> {
        let dataset = &self.inner.dataset;

        if let Some(id_category) = sense_id_category(query) {
            debug!("lookup: '{}' treated as a {} sense id", query, id_category);
            return dataset.find_by_id(id_category, query).into_iter().collect();
        }

        match category {
            Some(category) if query.is_empty() => dataset.table(category).iter().collect(),
            Some(category) => self.scan(query, category).collect(),
            None => Category::SEARCH_ORDER
                .into_iter()
                .flat_map(|category| self.scan(query, category))
                .collect(),
        }
    }

    /// Like [`WordNet::lookup`], with the category given by name.
    pub fn lookup_str(&self, query: &str, category: Option<&str>) -> Result<Vec<&SenseRecord>> {
        let category = category.map(str::parse::<Category>).transpose()?;
        Ok(self.lookup(query, category))
    }

    pub fn noun(&self, word: &str) -> Vec<&SenseRecord> {
        self.lookup(word, Some(Category::Noun))
    }

    pub fn verb(&self, word: &str) -> Vec<&SenseRecord> {
        self.lookup(word, Some(Category::Verb))
    }

    pub fn adjective(&self, word: &str) -> Vec<&SenseRecord> {
        self.lookup(word, Some(Category::Adjective))
    }

    pub fn adverb(&self, word: &str) -> Vec<&SenseRecord> {
        self.lookup(word, Some(Category::Adverb))
    }

    /// Resolves a sense id to its record.
    pub fn resolve(&self, id: &str) -> Result<&SenseRecord> {
        sense_id_category(id)
            .and_then(|category| self.inner.dataset.find_by_id(category, id))
            .ok_or_else(|| WordNetError::NotFound(id.to_string()))
    }

    /// Sorted, deduplicated list of every word in the dataset.
    /// Computed on first call and cached for the life of this instance.
    pub fn words(&self) -> &[String] {
        self.inner.vocabulary.get_or_init(|| {
            let start_time = Instant::now();
            let words: BTreeSet<&str> = self
                .inner
                .dataset
                .records()
                .flat_map(|record| record.words.iter().map(String::as_str))
                .collect();
            let words: Vec<String> = words.into_iter().map(String::from).collect();
            debug!(
                "Built vocabulary of {} words in {:?}",
                words.len(),
                start_time.elapsed()
            );
            words
        })
    }

    /// Picks a random record from any table.
    pub fn random_record(&self) -> Result<&SenseRecord> {
        let dataset = &self.inner.dataset;
        if dataset.is_empty() {
            return Err(WordNetError::NotFound("no records loaded".to_string()));
        }
        let picked = rand::rng().random_range(0..dataset.len());
        dataset
            .records()
            .nth(picked)
            .ok_or_else(|| WordNetError::NotFound(format!("record #{}", picked)))
    }

    fn scan<'a>(&'a self, word: &str, category: Category) -> impl Iterator<Item = &'a SenseRecord> {
        self.inner
            .dataset
            .table(category)
            .iter()
            .filter(move |record| record.has_word(word))
    }
}

type LoadAttempt = Shared<BoxFuture<'static, std::result::Result<WordNet, Arc<WordNetError>>>>;

/// Loads a [`WordNet`] at most once and shares it.
///
/// Concurrent callers of [`WordNetLoader::get_or_load`] wait on the same
/// in-flight load and all receive the same instance. A failed load is
/// returned to every caller of that attempt as [`WordNetError::LoadFailed`];
/// only a later call starts a new one.
pub struct WordNetLoader {
    options: LoadOptions,
    progress: Option<ProgressReporter>,
    in_flight: Mutex<Option<LoadAttempt>>,
    cell: OnceCell<WordNet>,
}

impl WordNetLoader {
    pub fn new(options: LoadOptions) -> Self {
        WordNetLoader {
            options,
            progress: None,
            in_flight: Mutex::new(None),
            cell: OnceCell::new(),
        }
    }

    /// Reports acquisition progress of every load attempt to `callback`.
    pub fn with_progress(self, callback: ProgressCallback) -> Self {
        WordNetLoader {
            progress: Some(reporter_from_callback(callback)),
            ..self
        }
    }

    /// Returns the loaded instance, loading it first if needed.
    pub async fn get_or_load(&self) -> Result<&WordNet> {
        if let Some(wn) = self.cell.get() {
            return Ok(wn);
        }

        let attempt = self.join_or_start();
        let outcome = attempt.clone().await;
        self.finish(&attempt);

        match outcome {
            Ok(wn) => Ok(self.cell.get_or_init(|| async move { wn }).await),
            Err(e) => Err(WordNetError::LoadFailed(e)),
        }
    }

    fn join_or_start(&self) -> LoadAttempt {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(attempt) = in_flight.as_ref() {
            debug!("Joining the WordNet load already in flight");
            return attempt.clone();
        }

        debug!("Starting a WordNet load");
        let attempt = WordNet::load_with_reporter(self.options.clone(), self.progress.clone())
            .map(|result| {
                result.map_err(|e| {
                    warn!("WordNet load failed: {}", e);
                    Arc::new(e)
                })
            })
            .boxed()
            .shared();
        *in_flight = Some(attempt.clone());
        attempt
    }

    // Drops the finished attempt so the next call after a failure starts over.
    fn finish(&self, attempt: &LoadAttempt) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if in_flight
            .as_ref()
            .is_some_and(|current| current.ptr_eq(attempt))
        {
            *in_flight = None;
        }
    }

    /// Returns the instance if a load has completed.
    pub fn get(&self) -> Result<&WordNet> {
        self.cell.get().ok_or(WordNetError::NotLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}
