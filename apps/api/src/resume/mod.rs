//! Résumé Extractor — upload boundary, text extraction, and heuristic
//! profile construction with an optional remote parsing path.

pub mod extract;
pub mod handlers;
pub mod heuristics;
pub mod remote;
