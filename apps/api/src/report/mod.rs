//! Report export — serializes a `Report` into the flat text document offered
//! to the user as a download.

use chrono::{DateTime, Utc};

use crate::models::Report;

/// Download filename, dated with the generation day.
pub fn export_filename(generated_at: DateTime<Utc>) -> String {
    format!("interview-report-{}.txt", generated_at.format("%Y-%m-%d"))
}

/// Renders the flat text document: scores, then strengths, areas for
/// improvement, and recommendations, one per numbered line.
pub fn render_text(report: &Report, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str("INTERVU - PERFORMANCE REPORT\n");
    out.push_str(&format!(
        "Generated on: {} at {}\n\n",
        generated_at.format("%Y-%m-%d"),
        generated_at.format("%H:%M:%S UTC")
    ));

    out.push_str(&format!(
        "OVERALL SCORE: {}/100 - {}\n\n",
        report.overall,
        Report::score_label(report.overall)
    ));

    out.push_str("DETAILED SCORES:\n");
    out.push_str(&format!("- Confidence: {}/100\n", report.confidence));
    out.push_str(&format!("- Clarity: {}/100\n", report.clarity));
    out.push_str(&format!("- Relevance: {}/100\n", report.relevance));
    out.push_str(&format!("- Detail: {}/100\n\n", report.detail));

    out.push_str("STRENGTHS:\n");
    push_numbered(&mut out, &report.strengths);

    out.push_str("\nAREAS FOR IMPROVEMENT:\n");
    push_numbered(&mut out, &report.weaknesses);

    out.push_str("\nRECOMMENDATIONS:\n");
    push_numbered(&mut out, &report.recommendations);

    out
}

fn push_numbered(out: &mut String, lines: &[String]) {
    for (i, line) in lines.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_report() -> Report {
        Report {
            overall: 72,
            confidence: 70,
            clarity: 74,
            relevance: 71,
            detail: 73,
            strengths: vec!["Clear structure.".to_string(), "Good examples.".to_string()],
            weaknesses: vec!["Could be more concise.".to_string()],
            recommendations: vec!["Practice condensing answers.".to_string()],
            question_feedback: vec![],
        }
    }

    #[test]
    fn test_filename_carries_date() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        assert_eq!(export_filename(ts), "interview-report-2026-08-30.txt");
    }

    #[test]
    fn test_render_contains_scores_and_numbered_sections() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let text = render_text(&sample_report(), ts);

        assert!(text.contains("OVERALL SCORE: 72/100 - Good"));
        assert!(text.contains("- Confidence: 70/100"));
        assert!(text.contains("STRENGTHS:\n1. Clear structure.\n2. Good examples."));
        assert!(text.contains("AREAS FOR IMPROVEMENT:\n1. Could be more concise."));
        assert!(text.contains("RECOMMENDATIONS:\n1. Practice condensing answers."));
    }
}
