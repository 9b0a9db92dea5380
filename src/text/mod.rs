//! Text normalization and correction
//!
//! Raw recognizer output is split into clean numbered lines, then repaired
//! by an ordered, mode-aware rule chain.

pub mod corrections;
pub mod normalizer;

use serde::{Deserialize, Serialize};

/// Outcome tag for one extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    NoTextDetected,
}

/// One corrected line of recognized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub line_number: usize,
    pub content: String,
}

/// Final result of an extraction request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedResult {
    pub status: Status,
    pub rows: Vec<Row>,
    pub line_count: usize,
    pub processing_time_ms: u64,
}

impl FormattedResult {
    /// Number surviving lines 1-based in original order. An empty line list
    /// degrades to `no_text_detected` rather than an error.
    pub fn from_lines(lines: Vec<String>, processing_time_ms: u64) -> Self {
        if lines.is_empty() {
            return Self {
                status: Status::NoTextDetected,
                rows: Vec::new(),
                line_count: 0,
                processing_time_ms,
            };
        }

        let rows: Vec<Row> = lines
            .into_iter()
            .enumerate()
            .map(|(i, content)| Row {
                line_number: i + 1,
                content,
            })
            .collect();

        Self {
            status: Status::Success,
            line_count: rows.len(),
            rows,
            processing_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lines_numbers_contiguously() {
        let result = FormattedResult::from_lines(
            vec!["first".to_string(), "second".to_string()],
            12,
        );

        assert_eq!(result.status, Status::Success);
        assert_eq!(result.line_count, 2);
        assert_eq!(result.rows[0].line_number, 1);
        assert_eq!(result.rows[0].content, "first");
        assert_eq!(result.rows[1].line_number, 2);
        assert_eq!(result.processing_time_ms, 12);
    }

    #[test]
    fn test_empty_lines_degrade_to_no_text() {
        let result = FormattedResult::from_lines(Vec::new(), 3);

        assert_eq!(result.status, Status::NoTextDetected);
        assert!(result.rows.is_empty());
        assert_eq!(result.line_count, 0);
    }

    #[test]
    fn test_serializes_with_snake_case_status() {
        let result = FormattedResult::from_lines(vec!["hi".to_string()], 1);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["rows"][0]["line_number"], 1);
        assert_eq!(json["rows"][0]["content"], "hi");
        assert_eq!(json["line_count"], 1);

        let empty = FormattedResult::from_lines(Vec::new(), 1);
        let json = serde_json::to_value(&empty).unwrap();
        assert_eq!(json["status"], "no_text_detected");
    }
}
