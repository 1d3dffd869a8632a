//! Plain text batch report.

use time::macros::format_description;

use crate::batch::BatchSummary;
use crate::formatters::fragment_rows;
use crate::job::JobStatus;
use crate::{Result, TransferoError};

/// Configuration for plain text report output.
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Include per-fragment rows under each successful page.
    pub include_rows: bool,
}

/// Plain text formatter for batch summaries.
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    /// Render a batch summary as a plain text report.
    pub fn convert(&self, summary: &BatchSummary) -> Result<String> {
        convert_to_text(summary, &self.config)
    }
}

/// Renders a batch summary as a plain text report.
///
/// Pages appear in submission order regardless of completion order.
pub fn convert_to_text(summary: &BatchSummary, config: &TextConfig) -> Result<String> {
    let timestamp_format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let finished = summary
        .finished_at
        .format(&timestamp_format)
        .map_err(|e| TransferoError::SerializeError(e.to_string()))?;

    let mut output = String::new();
    output.push_str("Batch text extraction report\n");
    output.push_str(&"=".repeat(50));
    output.push('\n');
    output.push_str(&format!("Finished:  {}\n", finished));
    output.push_str(&format!("Succeeded: {}\n", summary.succeeded));
    output.push_str(&format!("Failed:    {}\n", summary.failed));
    output.push_str(&format!("Total:     {}\n\n", summary.total()));

    if summary.results.is_empty() {
        return Ok(output.trim_end().to_string());
    }

    output.push_str("Details:\n");
    output.push_str(&"-".repeat(30));
    output.push('\n');

    for result in summary.by_submission_order() {
        let completed = result
            .timestamp
            .format(&timestamp_format)
            .map_err(|e| TransferoError::SerializeError(e.to_string()))?;

        output.push_str(&format!("URL:       {}\n", result.url));
        match result.status {
            JobStatus::Success => {
                output.push_str("Status:    success\n");
                output.push_str(&format!("Fragments: {}\n", result.fragment_count()));
            }
            JobStatus::Failed => {
                output.push_str("Status:    failed\n");
                output.push_str(&format!(
                    "Error:     {}\n",
                    result.error.as_deref().unwrap_or("unknown")
                ));
            }
        }
        output.push_str(&format!("Completed: {}\n", completed));

        if config.include_rows && result.is_success() {
            for row in fragment_rows(result) {
                output.push_str(&format!("  [{}] {} <{}> {}\n", row.index, kind_label(row.kind), row.tag, row.text));
                for (lang, translated) in &row.translations {
                    output.push_str(&format!("      {}: {}\n", lang, translated));
                }
            }
        }

        output.push_str(&"-".repeat(30));
        output.push('\n');
    }

    Ok(output.trim_end().to_string())
}

fn kind_label(kind: crate::fragment::FragmentKind) -> &'static str {
    match kind {
        crate::fragment::FragmentKind::Heading => "heading",
        crate::fragment::FragmentKind::Content => "content",
    }
}
