//! Question Generator — remote text generation with guaranteed local fallback.
//!
//! The remote path asks the text-generation endpoint for exactly ten
//! numbered questions grounded in the résumé text. Any failure on that path
//! (network, HTTP status, unparseable or empty response) degrades to the
//! local template generator and is never surfaced to the caller as an error.

use std::collections::HashSet;

use tracing::{info, warn};

use super::local::generate_local;
use crate::models::{Profile, Question, QuestionCategory};
use crate::textgen::{parse_numbered_lines, TextGenClient};

const REQUESTED_QUESTIONS: usize = 10;

/// Generates the session's question sequence. Infallible by contract: the
/// local generator guarantees non-empty output for any profile.
pub async fn generate_questions(textgen: &TextGenClient, profile: &Profile) -> Vec<Question> {
    if textgen.is_configured() {
        match generate_remote(textgen, profile).await {
            Ok(questions) if !questions.is_empty() => {
                info!("remote generation produced {} questions", questions.len());
                return questions;
            }
            Ok(_) => warn!("remote generation returned no questions, using local templates"),
            Err(e) => warn!("remote generation failed, using local templates: {e}"),
        }
    }

    let questions = generate_local(profile);
    info!("local generation produced {} questions", questions.len());
    questions
}

async fn generate_remote(
    textgen: &TextGenClient,
    profile: &Profile,
) -> Result<Vec<Question>, crate::textgen::TextGenError> {
    let prompt = build_prompt(profile);
    let text = textgen.generate(&prompt).await?;
    let lines = parse_numbered_lines(&text)?;

    let mut seen_texts = HashSet::new();
    let questions = lines
        .into_iter()
        .filter(|text| seen_texts.insert(text.clone()))
        .take(REQUESTED_QUESTIONS)
        .enumerate()
        .map(|(i, text)| {
            let category = categorize(&text, profile);
            let context = determine_context(&text, profile);
            Question {
                id: format!("api-{}", i + 1),
                text,
                category,
                context,
            }
        })
        .collect();
    Ok(questions)
}

fn build_prompt(profile: &Profile) -> String {
    format!(
        "Generate exactly 10 interview questions based on the following resume.\n\
         Do not add any introductions, explanations, or extra text - only list the questions:\n\n\
         {}\n\n\
         Format:\n\
         1. [First Question]\n\
         2. [Second Question]\n\
         ... up to 10.\n\n\
         Make sure questions are very specific to the resume content, skills, experience, \
         projects, and education mentioned.\n\
         Do not generate generic questions that could apply to any resume.",
        profile.prompt_text()
    )
}

/// Classifies a generated question against the profile it was built from.
fn categorize(text: &str, profile: &Profile) -> QuestionCategory {
    let lower = text.to_lowercase();

    if lower.contains("skill") || profile.skills.iter().any(|s| text.contains(s.as_str())) {
        QuestionCategory::Skills
    } else if lower.contains("project")
        || profile.projects.iter().any(|p| text.contains(&p.title))
    {
        QuestionCategory::Projects
    } else if lower.contains("experience")
        || profile
            .experience
            .iter()
            .any(|e| text.contains(&e.company) || text.contains(&e.role))
    {
        QuestionCategory::Experience
    } else {
        QuestionCategory::General
    }
}

/// Finds the profile term a question references: skill, then company/role,
/// then project title, then degree.
fn determine_context(text: &str, profile: &Profile) -> Option<String> {
    if let Some(skill) = profile.skills.iter().find(|s| text.contains(s.as_str())) {
        return Some(skill.clone());
    }

    for exp in &profile.experience {
        if text.contains(&exp.company) || (!exp.role.is_empty() && text.contains(&exp.role)) {
            return Some(format!("{} at {}", exp.role, exp.company));
        }
    }

    if let Some(project) = profile.projects.iter().find(|p| text.contains(&p.title)) {
        return Some(project.title.clone());
    }

    profile
        .education
        .iter()
        .find(|e| text.contains(&e.institution) || text.contains(&e.degree))
        .map(|e| e.degree.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceEntry, ProjectEntry};

    fn sample_profile() -> Profile {
        Profile {
            name: "Jordan".to_string(),
            email: None,
            phone: None,
            skills: vec!["Rust".to_string(), "PostgreSQL".to_string()],
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                role: "Backend Engineer".to_string(),
                duration: "2021-Present".to_string(),
                description: "Pipelines".to_string(),
            }],
            education: vec![],
            projects: vec![ProjectEntry {
                title: "Telemetry Dashboard".to_string(),
                description: "Metrics".to_string(),
                technologies: vec![],
            }],
            raw_text: None,
        }
    }

    #[test]
    fn test_categorize_by_skill_mention() {
        let profile = sample_profile();
        assert_eq!(
            categorize("How have you used Rust in production?", &profile),
            QuestionCategory::Skills
        );
    }

    #[test]
    fn test_categorize_by_project_title() {
        let profile = sample_profile();
        assert_eq!(
            categorize("Walk me through the Telemetry Dashboard.", &profile),
            QuestionCategory::Projects
        );
    }

    #[test]
    fn test_categorize_by_company() {
        let profile = sample_profile();
        assert_eq!(
            categorize("What did you build at Acme?", &profile),
            QuestionCategory::Experience
        );
    }

    #[test]
    fn test_categorize_general_fallback() {
        let profile = sample_profile();
        assert_eq!(
            categorize("Where do you see yourself in five years?", &profile),
            QuestionCategory::General
        );
    }

    #[test]
    fn test_determine_context_prefers_skill() {
        let profile = sample_profile();
        assert_eq!(
            determine_context("Tell me about Rust at Acme.", &profile),
            Some("Rust".to_string())
        );
    }

    #[test]
    fn test_determine_context_company_formats_role() {
        let profile = sample_profile();
        assert_eq!(
            determine_context("What did you do at Acme?", &profile),
            Some("Backend Engineer at Acme".to_string())
        );
    }

    #[test]
    fn test_determine_context_none_for_unrelated() {
        let profile = sample_profile();
        assert_eq!(
            determine_context("What motivates you?", &profile),
            None
        );
    }

    #[test]
    fn test_build_prompt_embeds_resume_text() {
        let profile = sample_profile();
        let prompt = build_prompt(&profile);
        assert!(prompt.contains("exactly 10 interview questions"));
        assert!(prompt.contains("Skills: Rust, PostgreSQL"));
    }

    #[tokio::test]
    async fn test_remote_http_error_falls_back_to_local() {
        // Endpoint that cannot be reached: the remote path must fail and the
        // local generator must still yield questions without any error.
        let textgen = TextGenClient::new(
            "http://127.0.0.1:1/generate".to_string(),
            Some("test-key".to_string()),
        )
        .unwrap();
        let questions = generate_questions(&textgen, &sample_profile()).await;
        assert!(!questions.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_client_goes_straight_to_local() {
        let textgen = TextGenClient::new("http://localhost:9".to_string(), None).unwrap();
        let questions = generate_questions(&textgen, &sample_profile()).await;
        assert!(!questions.is_empty());
        assert!(questions.iter().all(|q| !q.id.starts_with("api-")));
    }
}
