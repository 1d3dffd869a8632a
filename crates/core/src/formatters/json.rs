//! JSON batch report.

use serde_json::{Value, json};
use time::format_description::well_known::Rfc3339;

use crate::batch::BatchSummary;
use crate::formatters::fragment_rows;
use crate::{Result, TransferoError};

/// Configuration for JSON report output.
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty-print with indentation.
    pub pretty: bool,
}

/// JSON formatter for batch summaries.
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    /// Render a batch summary as a JSON report.
    pub fn convert(&self, summary: &BatchSummary) -> Result<String> {
        convert_to_json(summary, &self.config)
    }
}

/// Renders a batch summary as a JSON report.
///
/// Pages appear in submission order; each page carries its per-fragment
/// rows with translations keyed by language code.
pub fn convert_to_json(summary: &BatchSummary, config: &JsonConfig) -> Result<String> {
    let pages = summary
        .by_submission_order()
        .into_iter()
        .map(|result| {
            let timestamp = result
                .timestamp
                .format(&Rfc3339)
                .map_err(|e| TransferoError::SerializeError(e.to_string()))?;
            let rows = serde_json::to_value(fragment_rows(result))
                .map_err(|e| TransferoError::SerializeError(e.to_string()))?;
            let status = serde_json::to_value(result.status)
                .map_err(|e| TransferoError::SerializeError(e.to_string()))?;

            Ok(json!({
                "url": result.url,
                "url_index": result.url_index,
                "status": status,
                "error": result.error,
                "timestamp": timestamp,
                "fragment_count": result.fragment_count(),
                "rows": rows,
            }))
        })
        .collect::<Result<Vec<Value>>>()?;

    let generated_at = summary
        .finished_at
        .format(&Rfc3339)
        .map_err(|e| TransferoError::SerializeError(e.to_string()))?;

    let report = json!({
        "generated_at": generated_at,
        "succeeded": summary.succeeded,
        "failed": summary.failed,
        "total": summary.total(),
        "pages": pages,
    });

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };

    rendered.map_err(|e| TransferoError::SerializeError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::tests::sample_summary;

    #[test]
    fn test_json_report_structure() {
        let summary = sample_summary();
        let report = convert_to_json(&summary, &JsonConfig::default()).unwrap();
        let parsed: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(parsed["succeeded"], 1);
        assert_eq!(parsed["failed"], 1);
        assert_eq!(parsed["total"], 2);

        let pages = parsed["pages"].as_array().unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0]["url"], "https://example.com/one");
        assert_eq!(pages[0]["status"], "success");
        assert_eq!(pages[1]["status"], "failed");
    }

    #[test]
    fn test_json_rows_carry_translations() {
        let summary = sample_summary();
        let report = convert_to_json(&summary, &JsonConfig::default()).unwrap();
        let parsed: Value = serde_json::from_str(&report).unwrap();

        let rows = parsed["pages"][0]["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["index"], 1);
        assert_eq!(rows[0]["kind"], "heading");
        assert_eq!(rows[0]["translations"]["en"], "[en] Title");
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let summary = sample_summary();
        let compact = convert_to_json(&summary, &JsonConfig { pretty: false }).unwrap();
        let pretty = convert_to_json(&summary, &JsonConfig { pretty: true }).unwrap();

        assert!(!compact.contains('\n'));
        assert!(pretty.contains("\n  "));
    }

    #[test]
    fn test_formatter_wrapper() {
        let summary = sample_summary();
        let formatter = JsonFormatter::new(JsonConfig::default());

        assert_eq!(
            formatter.convert(&summary).unwrap(),
            convert_to_json(&summary, &JsonConfig::default()).unwrap()
        );
    }
}
