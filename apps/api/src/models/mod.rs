pub mod answer;
pub mod profile;
pub mod question;
pub mod report;

pub use answer::Answer;
pub use profile::{EducationEntry, ExperienceEntry, Profile, ProjectEntry};
pub use question::{Question, QuestionCategory};
pub use report::{QuestionFeedback, Report};
