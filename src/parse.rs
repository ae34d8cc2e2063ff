use crate::error::Result;
use crate::models::SenseRecord;
use log::debug;
use tokio::task;

/// Parses one JSON sense table (an array of records) using spawn_blocking.
pub async fn parse_table(json_content: String) -> Result<Vec<SenseRecord>> {
    debug!("Starting sense table parsing (using spawn_blocking)...");
    let records = task::spawn_blocking(move || -> Result<Vec<SenseRecord>> {
        Ok(serde_json::from_str(&json_content)?)
    })
    .await??;
    debug!("Parsed {} sense records.", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WordNetError;
    use crate::models::Category;

    const MINIMAL_TABLE: &str = r#"[
  {
    "id": "cat.noun.01",
    "syntactic_category": "Noun",
    "lexname": "noun.animal",
    "description": "feline mammal usually having thick soft fur",
    "words": ["cat", "true cat"]
  }
]"#;

    #[tokio::test]
    async fn test_parse_minimal_table() {
        let result = parse_table(MINIMAL_TABLE.to_string()).await;
        assert!(result.is_ok(), "Parsing failed: {:?}", result.err());
        let records = result.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "cat.noun.01");
        assert_eq!(records[0].syntactic_category, Category::Noun);
        assert_eq!(records[0].words, vec!["cat", "true cat"]);
        assert_eq!(records[0].lexname, "noun.animal");
    }

    #[tokio::test]
    async fn test_parse_rejects_unknown_category() {
        let json = r#"[{"id": "x.noun.01", "syntactic_category": "Preposition", "words": ["x"]}]"#;
        let result = parse_table(json.to_string()).await;
        assert!(matches!(result, Err(WordNetError::Json(_))));
    }

    #[tokio::test]
    async fn test_parse_empty_table() {
        let records = parse_table("[]".to_string()).await.unwrap();
        assert!(records.is_empty());
    }
}
