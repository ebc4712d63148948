//! Heuristic résumé scanning — regex/keyword extraction of a `Profile` from
//! plain text or from the section strings a remote parser returns.
//!
//! This is deliberately shallow. Résumés are too free-form for rule-based
//! parsing to be reliable; the goal is a profile good enough to anchor
//! question generation, not a faithful document model.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{EducationEntry, ExperienceEntry, Profile, ProjectEntry};

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(20\d{2})\s*-\s*(20\d{2}|present|current)\b").unwrap());

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(20\d{2})\b").unwrap());

static TECH_INTRO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)using|with|technologies|tools|stack|built\s+with|developed\s+with").unwrap()
});

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?\d{1,3}[\s.-]?)?(\(?\d{3}\)?[\s.-]?)\d{3}[\s.-]?\d{4}").unwrap()
});

const MAX_SKILLS: usize = 10;
const MAX_EXPERIENCE: usize = 3;
const MAX_EDUCATION: usize = 2;
const MAX_PROJECTS: usize = 3;

/// Known technology words that mark a token as a technology even without an
/// introducing keyword.
const TECH_WORDS: &[&str] = &[
    "React",
    "Angular",
    "Vue",
    "Node",
    "Python",
    "Java",
    "TypeScript",
    "JavaScript",
    "Rust",
    "Go",
    "HTML",
    "CSS",
    "AWS",
    "Docker",
    "Kubernetes",
    "SQL",
];

/// Builds a profile from the per-section strings a remote parsing service
/// returns (`name, email, phone, skills, experience, education, projects`,
/// all plain text).
pub fn profile_from_sections(sections: SectionTexts) -> Profile {
    let raw_text = reassemble_raw_text(&sections);
    Profile {
        name: if sections.name.trim().is_empty() {
            "User".to_string()
        } else {
            sections.name.trim().to_string()
        },
        email: non_empty(sections.email),
        phone: non_empty(sections.phone),
        skills: parse_skills(&sections.skills),
        experience: parse_experience(&sections.experience),
        education: parse_education(&sections.education),
        projects: parse_projects(&sections.projects),
        raw_text: Some(raw_text),
    }
}

/// Builds a profile from the full text of a locally extracted document by
/// slicing it into sections at recognizable headers first.
pub fn profile_from_text(text: &str) -> Profile {
    let name = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("User")
        .to_string();

    let sections = SectionTexts {
        name,
        email: find_email(text).unwrap_or_default(),
        phone: find_phone(text).unwrap_or_default(),
        skills: section_body(text, &["skills", "technical skills", "technologies"]),
        experience: section_body(text, &["experience", "work experience", "employment"]),
        education: section_body(text, &["education", "academics"]),
        projects: section_body(text, &["projects", "personal projects"]),
    };

    let mut profile = profile_from_sections(sections);
    profile.raw_text = Some(text.to_string());
    profile
}

/// Deterministic profile substituted when parsing fails and degraded-mode
/// continuation is enabled.
pub fn placeholder_profile() -> Profile {
    Profile {
        name: "Alex Johnson".to_string(),
        email: Some("alex.johnson@example.com".to_string()),
        phone: Some("555-123-4567".to_string()),
        skills: [
            "JavaScript",
            "React",
            "TypeScript",
            "Node.js",
            "CSS",
            "HTML",
            "Git",
            "UI/UX Design",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        experience: vec![
            ExperienceEntry {
                company: "Tech Solutions Inc.".to_string(),
                role: "Senior Frontend Developer".to_string(),
                duration: "2020-Present".to_string(),
                description: "Led development of responsive web applications using React and \
                              TypeScript. Implemented state management with Redux and improved \
                              performance by 30%."
                    .to_string(),
            },
            ExperienceEntry {
                company: "Digital Innovations".to_string(),
                role: "Web Developer".to_string(),
                duration: "2018-2020".to_string(),
                description: "Developed and maintained client websites. Created reusable \
                              components and implemented responsive designs."
                    .to_string(),
            },
        ],
        education: vec![EducationEntry {
            institution: "University of Technology".to_string(),
            degree: "Bachelor of Science in Computer Science".to_string(),
            year: "2018".to_string(),
        }],
        projects: vec![
            ProjectEntry {
                title: "E-commerce Platform".to_string(),
                description: "Built a full-featured e-commerce platform with React, Node.js, \
                              and MongoDB"
                    .to_string(),
                technologies: vec![
                    "React".to_string(),
                    "Node.js".to_string(),
                    "MongoDB".to_string(),
                    "Express".to_string(),
                ],
            },
            ProjectEntry {
                title: "Portfolio Website".to_string(),
                description: "Designed and developed a personal portfolio website with modern \
                              animations"
                    .to_string(),
                technologies: vec![
                    "React".to_string(),
                    "Three.js".to_string(),
                    "Tailwind CSS".to_string(),
                ],
            },
        ],
        raw_text: None,
    }
}

/// Plain-text section inputs for profile construction.
#[derive(Debug, Default)]
pub struct SectionTexts {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub projects: String,
}

fn reassemble_raw_text(sections: &SectionTexts) -> String {
    let mut out = format!("Name: {}\n", sections.name);
    if !sections.email.is_empty() {
        out.push_str(&format!("Email: {}\n", sections.email));
    }
    if !sections.phone.is_empty() {
        out.push_str(&format!("Phone: {}\n", sections.phone));
    }
    out.push_str(&format!("\nSkills: {}\n", sections.skills));
    out.push_str(&format!("\nExperience: {}\n", sections.experience));
    out.push_str(&format!("\nEducation: {}\n", sections.education));
    out.push_str(&format!("\nProjects: {}\n", sections.projects));
    out
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Splits a skills blob on commas or newlines.
pub fn parse_skills(text: &str) -> Vec<String> {
    text.split(|c| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_SKILLS)
        .map(str::to_string)
        .collect()
}

/// Splits experience text on blank lines; first line is `company - role`.
pub fn parse_experience(text: &str) -> Vec<ExperienceEntry> {
    blocks(text)
        .into_iter()
        .take(MAX_EXPERIENCE)
        .map(|block| {
            let mut lines = block.lines();
            let first = lines.next().unwrap_or_default();
            let (company, role) = match first.split_once('-') {
                Some((company, role)) => (company.trim().to_string(), role.trim().to_string()),
                None => (first.trim().to_string(), String::new()),
            };
            ExperienceEntry {
                company,
                role,
                duration: extract_duration(&block),
                description: lines.collect::<Vec<_>>().join(" ").trim().to_string(),
            }
        })
        .collect()
}

pub fn parse_education(text: &str) -> Vec<EducationEntry> {
    blocks(text)
        .into_iter()
        .take(MAX_EDUCATION)
        .map(|block| {
            let mut lines = block.lines();
            EducationEntry {
                institution: lines.next().unwrap_or_default().trim().to_string(),
                degree: lines.next().unwrap_or_default().trim().to_string(),
                year: extract_year(&block),
            }
        })
        .collect()
}

pub fn parse_projects(text: &str) -> Vec<ProjectEntry> {
    blocks(text)
        .into_iter()
        .take(MAX_PROJECTS)
        .map(|block| {
            let mut lines = block.lines();
            ProjectEntry {
                title: lines.next().unwrap_or_default().trim().to_string(),
                description: lines.collect::<Vec<_>>().join(" ").trim().to_string(),
                technologies: extract_technologies(&block),
            }
        })
        .collect()
}

/// Non-empty paragraphs, split on blank lines.
fn blocks(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect()
}

fn extract_duration(text: &str) -> String {
    DURATION_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn extract_year(text: &str) -> String {
    YEAR_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn extract_technologies(text: &str) -> Vec<String> {
    // A keyword introducing a technology list takes priority.
    if let Some(m) = TECH_INTRO_RE.find(text) {
        return text[m.end()..]
            .split(|c| c == ',' || c == '\n')
            .map(|t| t.trim().trim_start_matches(':').trim())
            .filter(|t| !t.is_empty())
            .take(5)
            .map(str::to_string)
            .collect();
    }

    // Otherwise pick out words that look like technologies.
    TECH_WORDS
        .iter()
        .filter(|w| text.contains(**w))
        .map(|w| w.to_string())
        .collect()
}

fn find_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

fn find_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().trim().to_string())
}

/// Returns the body of the first section whose header line matches one of
/// `headers` (case-insensitive, the header alone on its line), up to the next
/// all-caps-ish header or end of text.
fn section_body(text: &str, headers: &[&str]) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.iter().position(|line| {
        let lower = line.trim().trim_end_matches(':').to_lowercase();
        headers.iter().any(|h| lower == *h)
    });

    let Some(start) = start else {
        return String::new();
    };

    let body: Vec<&str> = lines[start + 1..]
        .iter()
        .take_while(|line| !looks_like_header(line))
        .copied()
        .collect();
    body.join("\n").trim().to_string()
}

fn looks_like_header(line: &str) -> bool {
    let trimmed = line.trim().trim_end_matches(':');
    if trimmed.is_empty() || trimmed.len() > 30 {
        return false;
    }
    let known = [
        "skills",
        "technical skills",
        "technologies",
        "experience",
        "work experience",
        "employment",
        "education",
        "academics",
        "projects",
        "personal projects",
        "summary",
        "objective",
    ];
    known.contains(&trimmed.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "\
Jordan Reyes
jordan.reyes@example.com | 555-987-6543

Skills
Rust, Python, PostgreSQL, Docker, Kubernetes

Experience
Acme Corp - Backend Engineer
2021 - Present
Built event-driven ingestion pipelines handling 2M events/day.

Initech - Software Developer
2019 - 2021
Maintained internal billing services.

Education
State University
Bachelor of Science in Computer Science
2019

Projects
Telemetry Dashboard
Real-time metrics dashboard built with Rust and React.
";

    #[test]
    fn test_parse_skills_splits_and_caps_at_ten() {
        let skills = parse_skills("a, b, c\nd, e, f, g, h, i, j, k, l");
        assert_eq!(skills.len(), 10);
        assert_eq!(skills[0], "a");
    }

    #[test]
    fn test_parse_experience_company_role_split() {
        let entries = parse_experience("Acme Corp - Backend Engineer\n2021 - Present\nDid things.");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].company, "Acme Corp");
        assert_eq!(entries[0].role, "Backend Engineer");
        assert_eq!(entries[0].duration, "2021 - Present");
        assert!(entries[0].description.contains("Did things."));
    }

    #[test]
    fn test_parse_experience_caps_at_three_blocks() {
        let text = "A - r\n\nB - r\n\nC - r\n\nD - r";
        assert_eq!(parse_experience(text).len(), 3);
    }

    #[test]
    fn test_extract_year_and_duration() {
        assert_eq!(extract_year("graduated 2019 with honors"), "2019");
        assert_eq!(extract_duration("2019 - 2021 at Initech"), "2019 - 2021");
        assert_eq!(extract_duration("2020-present"), "2020-present");
        assert_eq!(extract_duration("no dates here"), "");
    }

    #[test]
    fn test_extract_technologies_from_intro_keyword() {
        let techs = extract_technologies("Dashboard built with Rust, React, WebSockets");
        assert_eq!(techs, vec!["Rust", "React", "WebSockets"]);
    }

    #[test]
    fn test_extract_technologies_from_known_words() {
        let techs = extract_technologies("A Python and Docker based service");
        assert!(techs.contains(&"Python".to_string()));
        assert!(techs.contains(&"Docker".to_string()));
    }

    #[test]
    fn test_contact_patterns_match_across_repeated_scans() {
        // The patterns are shared statics; repeated scans must keep matching.
        for _ in 0..3 {
            assert_eq!(
                find_email("reach me at a.b+c@mail.example.org anytime"),
                Some("a.b+c@mail.example.org".to_string())
            );
            assert_eq!(
                find_phone("call (555) 987-6543 after noon"),
                Some("(555) 987-6543".to_string())
            );
            assert_eq!(find_email("no contact details"), None);
            assert_eq!(find_phone("no contact details"), None);
        }
    }

    #[test]
    fn test_profile_from_text_full_document() {
        let profile = profile_from_text(SAMPLE_RESUME);
        assert_eq!(profile.name, "Jordan Reyes");
        assert_eq!(profile.email.as_deref(), Some("jordan.reyes@example.com"));
        assert_eq!(profile.phone.as_deref(), Some("555-987-6543"));
        assert_eq!(profile.skills.len(), 5);
        assert_eq!(profile.experience.len(), 2);
        assert_eq!(profile.experience[0].company, "Acme Corp");
        assert_eq!(profile.education.len(), 1);
        assert_eq!(profile.education[0].year, "2019");
        assert_eq!(profile.projects.len(), 1);
        assert_eq!(profile.projects[0].title, "Telemetry Dashboard");
        assert!(profile.raw_text.as_deref().unwrap().contains("Jordan"));
    }

    #[test]
    fn test_profile_from_sections_defaults_name() {
        let profile = profile_from_sections(SectionTexts {
            skills: "Rust".to_string(),
            ..Default::default()
        });
        assert_eq!(profile.name, "User");
        assert_eq!(profile.skills, vec!["Rust"]);
        assert!(profile.email.is_none());
    }

    #[test]
    fn test_placeholder_profile_is_usable() {
        let profile = placeholder_profile();
        assert!(!profile.is_effectively_empty());
        assert_eq!(profile.name, "Alex Johnson");
        assert_eq!(profile.experience.len(), 2);
    }
}
