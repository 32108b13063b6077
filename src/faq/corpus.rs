use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;

/// One canonical question/answer pair from the FAQ corpus file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Load the corpus from a JSON file holding an array of entries.
pub fn load_corpus(path: &Path) -> Result<Vec<FaqEntry>, ApiError> {
    let contents = fs::read_to_string(path)
        .map_err(|err| ApiError::Internal(format!("cannot read FAQ corpus {:?}: {}", path, err)))?;
    serde_json::from_str(&contents)
        .map_err(|err| ApiError::BadRequest(format!("invalid FAQ corpus {:?}: {}", path, err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_entries_from_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("faq.json");
        std::fs::write(
            &path,
            r#"[
                { "question": "What are your opening hours?", "answer": "We are open 9-5." },
                { "question": "Where are you located?", "answer": "Main Street 1." }
            ]"#,
        )
        .expect("write corpus");

        let corpus = load_corpus(&path).expect("corpus loads");
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[0].answer, "We are open 9-5.");
    }

    #[test]
    fn malformed_corpus_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("faq.json");
        std::fs::write(&path, "{ not json ").expect("write corpus");

        assert!(load_corpus(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_corpus(&dir.path().join("absent.json")).is_err());
    }
}
