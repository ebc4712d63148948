//! Local template-based question generation — the always-available fallback.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Profile, Question, QuestionCategory};

const MAX_QUESTIONS: usize = 10;

/// Skills common enough to warrant a follow-up detail question.
const DETAIL_SKILLS: &[&str] = &["JavaScript", "React", "TypeScript", "Node.js", "Rust", "Python"];

/// Fixed pool used when the profile carries no skills, experience, or
/// projects, so generation is never empty.
const GENERIC_POOL: &[&str] = &[
    "Tell me about yourself and your professional background.",
    "What kind of role are you looking for, and why?",
    "Describe a problem you are proud of having solved.",
    "How do you approach learning a new technology or tool?",
    "Where do you want to grow professionally over the next few years?",
];

/// Generates up to ten questions from profile templates, shuffled once.
pub fn generate_local(profile: &Profile) -> Vec<Question> {
    generate_local_with_rng(profile, &mut rand::thread_rng())
}

pub fn generate_local_with_rng<R: Rng>(profile: &Profile, rng: &mut R) -> Vec<Question> {
    let mut questions = Vec::new();

    for (i, skill) in profile.skills.iter().take(3).enumerate() {
        questions.push(Question {
            id: format!("skill-{i}"),
            text: format!(
                "Tell me about your experience with {skill}. What specific projects have you used it on?"
            ),
            category: QuestionCategory::Skills,
            context: Some(skill.clone()),
        });

        if DETAIL_SKILLS.contains(&skill.as_str()) {
            questions.push(Question {
                id: format!("skill-detail-{i}"),
                text: format!("What's the most challenging problem you've solved using {skill}?"),
                category: QuestionCategory::Skills,
                context: Some(skill.clone()),
            });
        }
    }

    for (i, exp) in profile.experience.iter().enumerate() {
        let context = format!("{} at {}", exp.role, exp.company);
        questions.push(Question {
            id: format!("exp-{i}"),
            text: format!(
                "As a {} at {}, what was the most challenging project you worked on?",
                exp.role, exp.company
            ),
            category: QuestionCategory::Experience,
            context: Some(context.clone()),
        });
        questions.push(Question {
            id: format!("exp-detail-{i}"),
            text: format!(
                "What key skills did you develop during your time as {} at {}?",
                exp.role, exp.company
            ),
            category: QuestionCategory::Experience,
            context: Some(context),
        });
    }

    for (i, project) in profile.projects.iter().enumerate() {
        questions.push(Question {
            id: format!("project-{i}"),
            text: format!(
                "For your {} project, can you explain the technical decisions you made and why?",
                project.title
            ),
            category: QuestionCategory::Projects,
            context: Some(project.title.clone()),
        });

        if !project.technologies.is_empty() {
            let techs = project
                .technologies
                .iter()
                .take(2)
                .cloned()
                .collect::<Vec<_>>()
                .join(" and ");
            questions.push(Question {
                id: format!("project-tech-{i}"),
                text: format!(
                    "How did you implement {} in your {} project?",
                    techs, project.title
                ),
                category: QuestionCategory::Projects,
                context: Some(project.title.clone()),
            });
        }
    }

    if questions.len() < 5 {
        if let Some(education) = profile.education.first() {
            questions.push(Question {
                id: "education-1".to_string(),
                text: format!(
                    "How did your {} from {} prepare you for your career?",
                    education.degree, education.institution
                ),
                category: QuestionCategory::General,
                context: Some(education.degree.clone()),
            });
        }
    }

    if questions.is_empty() {
        for (i, text) in GENERIC_POOL.iter().enumerate() {
            questions.push(Question {
                id: format!("generic-{i}"),
                text: text.to_string(),
                category: QuestionCategory::General,
                context: None,
            });
        }
    }

    // One-time shuffle to mix categories; sequence is fixed afterwards.
    questions.shuffle(rng);
    questions.truncate(MAX_QUESTIONS);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationEntry, ExperienceEntry, ProjectEntry};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn profile_3_skills_2_exp_1_project() -> Profile {
        Profile {
            name: "Jordan".to_string(),
            email: None,
            phone: None,
            skills: vec!["Rust".to_string(), "SQL".to_string(), "Docker".to_string()],
            experience: vec![
                ExperienceEntry {
                    company: "Acme".to_string(),
                    role: "Backend Engineer".to_string(),
                    duration: "2021-Present".to_string(),
                    description: "Pipelines".to_string(),
                },
                ExperienceEntry {
                    company: "Initech".to_string(),
                    role: "Developer".to_string(),
                    duration: "2019-2021".to_string(),
                    description: "Billing".to_string(),
                },
            ],
            education: vec![],
            projects: vec![ProjectEntry {
                title: "Telemetry Dashboard".to_string(),
                description: "Metrics".to_string(),
                technologies: vec!["Rust".to_string(), "React".to_string()],
            }],
            raw_text: None,
        }
    }

    #[test]
    fn test_mixed_profile_yields_nonempty_duplicate_free_set() {
        let mut rng = StdRng::seed_from_u64(7);
        let questions = generate_local_with_rng(&profile_3_skills_2_exp_1_project(), &mut rng);

        assert!(!questions.is_empty());
        assert!(questions.len() <= 10);

        let ids: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), questions.len(), "question ids must be unique");

        let categories: HashSet<_> = questions.iter().map(|q| q.category).collect();
        assert!(categories.contains(&QuestionCategory::Skills));
        assert!(categories.contains(&QuestionCategory::Experience));
    }

    #[test]
    fn test_empty_profile_falls_back_to_generic_pool() {
        let profile = Profile {
            name: "Anon".to_string(),
            email: None,
            phone: None,
            skills: vec![],
            experience: vec![],
            education: vec![],
            projects: vec![],
            raw_text: None,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let questions = generate_local_with_rng(&profile, &mut rng);
        assert_eq!(questions.len(), GENERIC_POOL.len());
        assert!(questions
            .iter()
            .all(|q| q.category == QuestionCategory::General));
    }

    #[test]
    fn test_education_question_added_when_sparse() {
        let profile = Profile {
            name: "Anon".to_string(),
            email: None,
            phone: None,
            skills: vec!["Figma".to_string()],
            experience: vec![],
            education: vec![EducationEntry {
                institution: "State University".to_string(),
                degree: "BSc Design".to_string(),
                year: "2020".to_string(),
            }],
            projects: vec![],
            raw_text: None,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let questions = generate_local_with_rng(&profile, &mut rng);
        assert!(questions.iter().any(|q| q.id == "education-1"));
    }

    #[test]
    fn test_never_more_than_ten_questions() {
        let mut profile = profile_3_skills_2_exp_1_project();
        profile.projects = (0..6)
            .map(|i| ProjectEntry {
                title: format!("Project {i}"),
                description: String::new(),
                technologies: vec!["Rust".to_string()],
            })
            .collect();
        let mut rng = StdRng::seed_from_u64(3);
        let questions = generate_local_with_rng(&profile, &mut rng);
        assert_eq!(questions.len(), 10);
    }

    #[test]
    fn test_common_skill_gets_detail_question() {
        let mut profile = profile_3_skills_2_exp_1_project();
        profile.skills = vec!["Rust".to_string()];
        profile.experience.clear();
        profile.projects.clear();
        let mut rng = StdRng::seed_from_u64(1);
        let questions = generate_local_with_rng(&profile, &mut rng);
        assert!(questions.iter().any(|q| q.id == "skill-detail-0"));
    }
}
