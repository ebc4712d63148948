use serde::{Deserialize, Serialize};

/// Structured representation of an uploaded résumé. Produced once by the
/// extractor and immutable for the rest of the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Ordered; duplicates allowed.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    /// Full résumé text, kept for the question-generation prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl Profile {
    /// True when the profile carries nothing a question generator can anchor on.
    pub fn is_effectively_empty(&self) -> bool {
        self.skills.is_empty() && self.experience.is_empty() && self.projects.is_empty()
    }

    /// Returns `raw_text` when present, otherwise reassembles a prompt-ready
    /// text block from the structured fields.
    pub fn prompt_text(&self) -> String {
        if let Some(raw) = &self.raw_text {
            if !raw.trim().is_empty() {
                return raw.clone();
            }
        }

        let mut out = format!("Name: {}\n", self.name);
        if let Some(email) = &self.email {
            out.push_str(&format!("Email: {email}\n"));
        }
        if let Some(phone) = &self.phone {
            out.push_str(&format!("Phone: {phone}\n"));
        }

        out.push_str(&format!("\nSkills: {}\n", self.skills.join(", ")));

        out.push_str("\nExperience:\n");
        for exp in &self.experience {
            out.push_str(&format!(
                "{} - {} ({})\n{}\n\n",
                exp.company, exp.role, exp.duration, exp.description
            ));
        }

        out.push_str("Education:\n");
        for edu in &self.education {
            out.push_str(&format!(
                "{} - {} ({})\n",
                edu.institution, edu.degree, edu.year
            ));
        }

        out.push_str("\nProjects:\n");
        for proj in &self.projects {
            out.push_str(&format!(
                "{}: {}\nTechnologies: {}\n\n",
                proj.title,
                proj.description,
                proj.technologies.join(", ")
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_is_effectively_empty() {
        let profile = Profile {
            name: "Test".to_string(),
            email: None,
            phone: None,
            skills: vec![],
            experience: vec![],
            education: vec![],
            projects: vec![],
            raw_text: None,
        };
        assert!(profile.is_effectively_empty());
    }

    #[test]
    fn test_profile_with_one_skill_is_not_empty() {
        let profile = Profile {
            name: "Test".to_string(),
            email: None,
            phone: None,
            skills: vec!["Rust".to_string()],
            experience: vec![],
            education: vec![],
            projects: vec![],
            raw_text: None,
        };
        assert!(!profile.is_effectively_empty());
    }

    #[test]
    fn test_prompt_text_prefers_raw_text() {
        let profile = Profile {
            name: "Test".to_string(),
            email: None,
            phone: None,
            skills: vec!["Rust".to_string()],
            experience: vec![],
            education: vec![],
            projects: vec![],
            raw_text: Some("verbatim resume body".to_string()),
        };
        assert_eq!(profile.prompt_text(), "verbatim resume body");
    }

    #[test]
    fn test_prompt_text_reassembles_structured_fields() {
        let profile = Profile {
            name: "Alex".to_string(),
            email: Some("alex@example.com".to_string()),
            phone: None,
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                role: "Engineer".to_string(),
                duration: "2020-2023".to_string(),
                description: "Built things".to_string(),
            }],
            education: vec![],
            projects: vec![],
            raw_text: None,
        };
        let text = profile.prompt_text();
        assert!(text.contains("Skills: Rust, SQL"));
        assert!(text.contains("Acme - Engineer (2020-2023)"));
        assert!(text.contains("alex@example.com"));
    }
}
