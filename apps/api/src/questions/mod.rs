pub mod generator;
pub mod local;

pub use generator::generate_questions;
