//! Record types exchanged with the vector store

use serde::{Deserialize, Deserializer, Serialize};

/// A Jeopardy question/answer record.
///
/// The public dataset uses capitalised keys while the store returns
/// lower-case property names; both deserialize. Properties the store
/// reports as `null` become empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "Category", default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(alias = "Question", default, deserialize_with = "null_as_empty")]
    pub question: String,
    #[serde(alias = "Answer", default, deserialize_with = "null_as_empty")]
    pub answer: String,
}

impl Question {
    pub fn new(category: &str, question: &str, answer: &str) -> Self {
        Self {
            category: category.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A per-object failure reported inside an otherwise successful batch call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchObjectError {
    /// Position of the object in the submitted slice
    pub index: usize,
    pub message: String,
}

/// Outcome of a single bulk insert call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// Objects submitted
    pub submitted: usize,
    /// UUIDs assigned to accepted objects, in submission order
    pub uuids: Vec<String>,
    pub errors: Vec<BatchObjectError>,
}

impl BatchSummary {
    pub fn inserted(&self) -> usize {
        self.submitted.saturating_sub(self.errors.len())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} submitted, {} inserted, {} failed",
            self.submitted,
            self.inserted(),
            self.errors.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_keys_are_capitalised() {
        let raw = r#"[{"Category":"SCIENCE","Question":"H2O","Answer":"Water"}]"#;
        let parsed: Vec<Question> = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed, vec![Question::new("SCIENCE", "H2O", "Water")]);
    }

    #[test]
    fn test_store_keys_are_lowercase() {
        let raw = r#"{"category":"ANIMALS","question":"Q","answer":"A"}"#;
        let parsed: Question = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.category, "ANIMALS");
    }

    #[test]
    fn test_null_and_missing_become_empty() {
        let raw = r#"{"category":null,"question":"Q"}"#;
        let parsed: Question = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.category, "");
        assert_eq!(parsed.answer, "");
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_value(Question::new("C", "Q", "A")).unwrap();
        assert_eq!(json["category"], "C");
        assert_eq!(json["question"], "Q");
        assert_eq!(json["answer"], "A");
    }

    #[test]
    fn test_summary_counts() {
        let summary = BatchSummary {
            submitted: 3,
            uuids: vec!["a".into(), "b".into()],
            errors: vec![BatchObjectError {
                index: 1,
                message: "bad".into(),
            }],
        };
        assert_eq!(summary.inserted(), 2);
        assert!(summary.has_errors());
        assert_eq!(summary.to_string(), "3 submitted, 2 inserted, 1 failed");
    }

    #[test]
    fn test_summary_with_more_errors_than_submitted() {
        let err = |index| BatchObjectError {
            index,
            message: "rejected".into(),
        };
        let summary = BatchSummary {
            submitted: 1,
            uuids: Vec::new(),
            errors: vec![err(0), err(1)],
        };
        assert_eq!(summary.inserted(), 0);
        assert_eq!(summary.to_string(), "1 submitted, 0 inserted, 2 failed");
    }
}
