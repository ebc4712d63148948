use serde::{Deserialize, Serialize};

/// The final scored feedback document for a session. Created once at session
/// end from the full answer list; discarded on restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Always `round(mean(confidence, clarity, relevance, detail))`.
    pub overall: u8,
    pub confidence: u8,
    pub clarity: u8,
    pub relevance: u8,
    pub detail: u8,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub question_feedback: Vec<QuestionFeedback>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionFeedback {
    pub question: String,
    pub answer: String,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

impl Report {
    /// Human label for a 0-100 score, used in the exported document.
    pub fn score_label(score: u8) -> &'static str {
        match score {
            80..=100 => "Excellent",
            70..=79 => "Good",
            60..=69 => "Satisfactory",
            50..=59 => "Needs Improvement",
            _ => "Poor",
        }
    }
}

/// Rounded mean of the four sub-scores.
pub fn overall_score(confidence: u8, clarity: u8, relevance: u8, detail: u8) -> u8 {
    let sum = confidence as u32 + clarity as u32 + relevance as u32 + detail as u32;
    ((sum as f64 / 4.0).round()) as u8
}
