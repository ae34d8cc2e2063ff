//! The four part-of-speech tables backing every query.

use crate::error::{Result, WordNetError};
use crate::models::{Category, SenseRecord, sense_id_category};
use crate::parse::parse_table;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File name of the JSON table for a category inside a data directory.
pub fn table_file_name(category: Category) -> String {
    format!("{}.json", category.token())
}

/// Path of the JSON table for a category inside `dir`.
pub fn table_path(dir: &Path, category: Category) -> PathBuf {
    dir.join(table_file_name(category))
}

/// Immutable sense tables, one per category.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    tables: [Vec<SenseRecord>; 4],
}

impl Dataset {
    /// Builds a dataset from in-memory tables, checking that every record
    /// belongs to the table it was placed in.
    ///
    /// Duplicate ids are kept but logged; id lookups return the first one.
    pub fn new(
        noun: Vec<SenseRecord>,
        verb: Vec<SenseRecord>,
        adjective: Vec<SenseRecord>,
        adverb: Vec<SenseRecord>,
    ) -> Result<Self> {
        let dataset = Dataset {
            tables: [noun, verb, adjective, adverb],
        };
        for category in Category::ALL {
            validate_table(category, dataset.table(category))?;
        }
        Ok(dataset)
    }

    /// Reads `noun.json`, `verb.json`, `adjective.json` and `adverb.json`
    /// from `dir`.
    pub async fn from_dir(dir: &Path) -> Result<Self> {
        let start_time = Instant::now();
        let mut tables: [Vec<SenseRecord>; 4] = Default::default();

        for category in Category::ALL {
            let path = table_path(dir, category);
            if !path.exists() {
                return Err(WordNetError::DataFileNotFound(path.display().to_string()));
            }
            debug!("Reading {} table from {:?}", category, path);
            let json_content = tokio::fs::read_to_string(&path).await?;
            tables[category.index()] = parse_table(json_content).await?;
        }

        let [noun, verb, adjective, adverb] = tables;
        let dataset = Dataset::new(noun, verb, adjective, adverb)?;
        info!(
            "Loaded {} sense records from {:?} in {:.2?}",
            dataset.len(),
            dir,
            start_time.elapsed()
        );
        Ok(dataset)
    }

    /// All records of one category, in table order.
    pub fn table(&self, category: Category) -> &[SenseRecord] {
        &self.tables[category.index()]
    }

    /// First record of `category` whose id equals `id`.
    pub fn find_by_id(&self, category: Category, id: &str) -> Option<&SenseRecord> {
        self.table(category).iter().find(|record| record.id == id)
    }

    /// Iterates over every record of every table, in table order.
    pub fn records(&self) -> impl Iterator<Item = &SenseRecord> {
        self.tables.iter().flatten()
    }

    /// Total number of records across all tables.
    pub fn len(&self) -> usize {
        self.tables.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_table(category: Category, records: &[SenseRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if record.syntactic_category != category {
            return Err(WordNetError::InvalidDataset(format!(
                "record {} is a {} but sits in the {} table",
                record.id, record.syntactic_category, category
            )));
        }
        if let Some(embedded) = sense_id_category(&record.id) {
            if embedded != category {
                return Err(WordNetError::InvalidDataset(format!(
                    "record {} names category {} but sits in the {} table",
                    record.id, embedded, category
                )));
            }
        }
        if !seen.insert(record.id.as_str()) {
            warn!(
                "Duplicate sense id {} in {} table; the first occurrence wins.",
                record.id, category
            );
        }
    }
    Ok(())
}
