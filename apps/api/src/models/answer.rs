use serde::{Deserialize, Serialize};

use super::question::Question;

/// A completed response to one question. Created exactly once per question,
/// appended to the session's ordered answer list, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub question: Question,
    /// Final transcribed text.
    pub text: String,
    /// Recording duration in whole seconds.
    pub duration_secs: u32,
}
