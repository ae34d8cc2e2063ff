//! Small reference dataset shared by the unit tests.
//!
//! "bitter" has 7 adjective, 1 verb, 3 noun and 1 adverb senses; none of its
//! adjective senses carries an antonym. "brittle" and "mellow" point at
//! senses that do not exist.

use crate::dataset::{Dataset, table_path};
use crate::models::{Category, SenseRecord};
use std::path::Path;

pub const NOUN_JSON: &str = r#"[
  {"id": "bitter.noun.01", "syntactic_category": "Noun", "lexname": "noun.attribute", "description": "the taste experience when quinine or coffee is taken into the mouth", "words": ["bitter", "bitterness"]},
  {"id": "bitter.noun.02", "syntactic_category": "Noun", "lexname": "noun.food", "description": "English term for a dry sharp-tasting ale", "words": ["bitter"]},
  {"id": "bitter.noun.03", "syntactic_category": "Noun", "lexname": "noun.substance", "description": "an aromatic liquor used in mixed drinks", "words": ["bitter"]},
  {"id": "warrant.noun.01", "syntactic_category": "Noun", "lexname": "noun.communication", "description": "a writ from a court commanding police to perform specified acts", "words": ["warrant"]},
  {"id": "teaberry.noun.01", "syntactic_category": "Noun", "lexname": "noun.plant", "description": "creeping shrub of eastern North America", "words": ["teaberry", "wintergreen"]}
]"#;

pub const VERB_JSON: &str = r#"[
  {"id": "bitter.verb.01", "syntactic_category": "Verb", "lexname": "verb.change", "description": "make bitter", "words": ["bitter"]},
  {"id": "warrant.verb.01", "syntactic_category": "Verb", "lexname": "verb.communication", "description": "stand behind and guarantee the quality of", "words": ["warrant", "guarantee"]},
  {"id": "dip.verb.10", "syntactic_category": "Verb", "lexname": "verb.contact", "description": "immerse briefly into a liquid", "words": ["dip", "douse"]}
]"#;

pub const ADJECTIVE_JSON: &str = r#"[
  {"id": "bitter.adjective.01", "syntactic_category": "Adjective", "lexname": "adj.all", "description": "marked by strong resentment or cynicism", "words": ["bitter"], "similar": ["acerb.adjective.01", "resentful.adjective.01"]},
  {"id": "acerb.adjective.01", "syntactic_category": "Adjective", "lexname": "adj.all", "description": "harsh or corrosive in tone", "words": ["acerb", "acerbic", "bitter"], "similar": []},
  {"id": "bitter.adjective.03", "syntactic_category": "Adjective", "lexname": "adj.all", "description": "causing a sharp and acrid taste experience", "words": ["bitter", "biting"], "similar": []},
  {"id": "bitter.adjective.04", "syntactic_category": "Adjective", "lexname": "adj.all", "description": "very difficult to accept or bear", "words": ["bitter", "raw"], "similar": []},
  {"id": "bitter.adjective.05", "syntactic_category": "Adjective", "lexname": "adj.all", "description": "proceeding from or exhibiting great hostility", "words": ["bitter", "acrid"], "similar": []},
  {"id": "bitter.adjective.06", "syntactic_category": "Adjective", "lexname": "adj.all", "description": "expressive of severe grief or regret", "words": ["bitter", "harsh"], "similar": []},
  {"id": "bitter.adjective.07", "syntactic_category": "Adjective", "lexname": "adj.all", "description": "causing a sharply painful or stinging sensation", "words": ["bitter", "intense"], "similar": []},
  {"id": "resentful.adjective.01", "syntactic_category": "Adjective", "lexname": "adj.all", "description": "full of or marked by resentment", "words": ["resentful", "sore"], "similar": []},
  {"id": "homosexual.adjective.01", "syntactic_category": "Adjective", "lexname": "adj.all", "description": "sexually attracted to members of your own sex", "words": ["homosexual", "gay", "queer"], "similar": [], "antonym": "heterosexual.adjective.01"},
  {"id": "heterosexual.adjective.01", "syntactic_category": "Adjective", "lexname": "adj.all", "description": "sexually attracted to members of the opposite sex", "words": ["heterosexual", "straight"], "similar": [], "antonym": "homosexual.adjective.01"},
  {"id": "respectful.adjective.02", "syntactic_category": "Adjective", "lexname": "adj.all", "description": "marked by propriety and deference", "words": ["respectful", "deferent"], "similar": []},
  {"id": "sweet.adjective.01", "syntactic_category": "Adjective", "lexname": "adj.all", "description": "having or denoting the characteristic taste of sugar", "words": ["sweet"], "similar": [], "antonym": ["sour.adjective.01", "sour.adjective.01"]},
  {"id": "sour.adjective.01", "syntactic_category": "Adjective", "lexname": "adj.all", "description": "having a sharp biting taste", "words": ["sour"], "similar": [], "antonym": "sweet.adjective.01"},
  {"id": "brittle.adjective.01", "syntactic_category": "Adjective", "lexname": "adj.all", "description": "having little elasticity", "words": ["brittle"], "similar": [], "antonym": "missing.adjective.09"},
  {"id": "mellow.adjective.01", "syntactic_category": "Adjective", "lexname": "adj.all", "description": "having a full, smooth flavour", "words": ["mellow"], "similar": ["missing.adjective.08"]}
]"#;

pub const ADVERB_JSON: &str = r#"[
  {"id": "bitter.adverb.01", "syntactic_category": "Adverb", "lexname": "adv.all", "description": "extremely and sharply", "words": ["bitterly", "bitter", "piercingly"]},
  {"id": "per annum.adverb.01", "syntactic_category": "Adverb", "lexname": "adv.all", "description": "by the year", "words": ["per annum", "p.a.", "annually"]}
]"#;

/// Number of distinct words in the fixture.
pub const FIXTURE_WORD_COUNT: usize = 33;

pub fn fixture_json(category: Category) -> &'static str {
    match category {
        Category::Noun => NOUN_JSON,
        Category::Verb => VERB_JSON,
        Category::Adjective => ADJECTIVE_JSON,
        Category::Adverb => ADVERB_JSON,
    }
}

pub fn fixture_dataset() -> Dataset {
    let table = |category| -> Vec<SenseRecord> {
        serde_json::from_str(fixture_json(category)).expect("fixture JSON is valid")
    };
    Dataset::new(
        table(Category::Noun),
        table(Category::Verb),
        table(Category::Adjective),
        table(Category::Adverb),
    )
    .expect("fixture dataset is consistent")
}

/// Writes the fixture as `<category>.json` files into `dir`.
pub fn write_fixture_tables(dir: &Path) -> std::io::Result<()> {
    for category in Category::ALL {
        std::fs::write(table_path(dir, category), fixture_json(category))?;
    }
    Ok(())
}

pub fn record(id: &str, category: Category, words: &[&str]) -> SenseRecord {
    SenseRecord {
        id: id.to_string(),
        syntactic_category: category,
        words: words.iter().map(|w| w.to_string()).collect(),
        lexname: String::new(),
        description: String::new(),
        similar: Vec::new(),
        antonyms: Vec::new(),
    }
}
