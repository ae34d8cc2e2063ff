use crate::error::WordNetError;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;

// --- Part of speech ---

/// One of the four part-of-speech tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Category {
    #[serde(alias = "noun")]
    Noun,
    #[serde(alias = "verb")]
    Verb,
    #[serde(alias = "adjective")]
    Adjective,
    #[serde(alias = "adverb")]
    Adverb,
}

impl Category {
    /// All categories, in table order.
    pub const ALL: [Category; 4] = [
        Category::Noun,
        Category::Verb,
        Category::Adjective,
        Category::Adverb,
    ];

    /// Order in which an unscoped lookup visits the tables.
    pub const SEARCH_ORDER: [Category; 4] = [
        Category::Adverb,
        Category::Adjective,
        Category::Verb,
        Category::Noun,
    ];

    /// Lowercase token, as embedded in sense ids and table file names.
    pub fn token(self) -> &'static str {
        match self {
            Category::Noun => "noun",
            Category::Verb => "verb",
            Category::Adjective => "adjective",
            Category::Adverb => "adverb",
        }
    }

    /// Capitalized label, as stored in `syntactic_category`.
    pub fn label(self) -> &'static str {
        match self {
            Category::Noun => "Noun",
            Category::Verb => "Verb",
            Category::Adjective => "Adjective",
            Category::Adverb => "Adverb",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Category::Noun => 0,
            Category::Verb => 1,
            Category::Adjective => 2,
            Category::Adverb => 3,
        }
    }
}

// Implement Display for Category for easier printing
impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

// Implement FromStr for Category for CLI parsing etc.
impl std::str::FromStr for Category {
    type Err = WordNetError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "n" | "noun" => Ok(Category::Noun),
            "v" | "verb" => Ok(Category::Verb),
            "a" | "adj" | "adjective" => Ok(Category::Adjective),
            "r" | "adv" | "adverb" => Ok(Category::Adverb),
            _ => Err(WordNetError::InvalidCategory(s.to_string())),
        }
    }
}

// --- Sense identifiers ---

static SENSE_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z]\.(adjective|verb|noun|adverb)\.[0-9]")
        .expect("sense id pattern is a valid regex")
});

/// Returns the category embedded in `query` if it looks like a sense id
/// (`<lemma>.<category>.<NN>`), `None` if it is a plain word.
pub fn sense_id_category(query: &str) -> Option<Category> {
    let captures = SENSE_ID_PATTERN.captures(query)?;
    captures.get(1)?.as_str().parse().ok()
}

// --- Sense Record ---

/// A single sense: one meaning shared by one or more words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenseRecord {
    pub id: String,
    pub syntactic_category: Category,
    /// Surface forms sharing this sense. The first one is the canonical lemma.
    pub words: Vec<String>,
    #[serde(default)]
    pub lexname: String,
    #[serde(default)]
    pub description: String,
    /// Ids of related adjective senses ("far" synonyms).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub similar: Vec<String>,
    /// Ids of opposing adjective senses. The bundled data stores either a
    /// single id or a list under `antonym`.
    #[serde(
        rename = "antonym",
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub antonyms: Vec<String>,
}

impl SenseRecord {
    /// The canonical lemma, used when showing an id as a word.
    pub fn lemma(&self) -> Option<&str> {
        self.words.first().map(String::as_str)
    }

    /// Exact-match membership test over `words`.
    pub fn has_word(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(id)) => vec![id],
        Some(OneOrMany::Many(ids)) => ids,
    })
}

// --- Derived relations ---

/// Synonyms found for one sense of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymSet {
    /// Id of the sense the synonyms come from.
    pub synset: String,
    /// Other words of the same sense.
    pub close: Vec<String>,
    /// Words of similar senses (adjectives only).
    pub far: Vec<String>,
}
