use serde::{Deserialize, Serialize};

/// Which part of the profile a question targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Skills,
    Experience,
    Projects,
    General,
}

/// One interview prompt. Immutable once generated; the ordered sequence is
/// fixed for the session after the one-time shuffle at generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique within a session (e.g. `skill-0`, `api-3`).
    pub id: String,
    pub text: String,
    pub category: QuestionCategory,
    /// The skill, company, or project the question references, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&QuestionCategory::Skills).unwrap(),
            r#""skills""#
        );
        assert_eq!(
            serde_json::to_string(&QuestionCategory::General).unwrap(),
            r#""general""#
        );
    }

    #[test]
    fn test_question_without_context_omits_field() {
        let q = Question {
            id: "general-1".to_string(),
            text: "Tell me about yourself.".to_string(),
            category: QuestionCategory::General,
            context: None,
        };
        let json = serde_json::to_string(&q).unwrap();
        assert!(!json.contains("context"));
    }
}
