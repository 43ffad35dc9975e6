//! Turns an [`UploadOutcome`] into the content of the result panel.
//!
//! Rendering is pure: the panel is plain data and the front-end decides how
//! it looks.
use api_types::{
    ErrorSummary, category::CategoriesImportSummary, transaction::TransactionsImportSummary,
};

use crate::{
    outcome::{ImportFailure, ImportSummary, UploadOutcome},
    target::ImportTarget,
};

/// At most this many error messages are listed, whatever the total.
pub const MAX_ERROR_DETAILS: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Danger,
}

/// Visual weight of a counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    Positive,
    Info,
    Neutral,
    Negative,
    Muted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counter {
    pub label: &'static str,
    pub value: u64,
    pub emphasis: Emphasis,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub label: &'static str,
    pub path: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultPanel {
    pub tone: Tone,
    pub heading: &'static str,
    /// Failure text, `None` on success.
    pub message: Option<String>,
    pub counters: Vec<Counter>,
    /// `(kind, count)` with underscores in the kind replaced by spaces.
    pub error_summary: Vec<(String, u64)>,
    /// First [`MAX_ERROR_DETAILS`] error messages.
    pub error_details: Vec<String>,
    /// Messages received but not listed.
    pub hidden_errors: usize,
    pub hints: Vec<&'static str>,
    pub links: Vec<Link>,
    pub retry_label: &'static str,
}

impl ResultPanel {
    /// Counter with the given label, if present.
    pub fn counter(&self, label: &str) -> Option<u64> {
        self.counters
            .iter()
            .find(|counter| counter.label == label)
            .map(|counter| counter.value)
    }

    /// Plain text rendering, one entry per line.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![self.heading.to_string()];
        if let Some(message) = &self.message {
            lines.push(message.clone());
        }
        for counter in &self.counters {
            lines.push(format!("{:>8}  {}", counter.value, counter.label));
        }
        if !self.error_summary.is_empty() {
            lines.push("Error Summary:".to_string());
            for (kind, count) in &self.error_summary {
                lines.push(format!("  - {kind}: {count}"));
            }
        }
        if !self.error_details.is_empty() {
            lines.push(format!(
                "Import Errors (showing first {MAX_ERROR_DETAILS}):"
            ));
            for detail in &self.error_details {
                lines.push(format!("  - {detail}"));
            }
            if self.hidden_errors > 0 {
                lines.push(format!("  ... and {} more", self.hidden_errors));
            }
        }
        if !self.hints.is_empty() {
            lines.push("Common Issues:".to_string());
            for hint in &self.hints {
                lines.push(format!("  - {hint}"));
            }
        }
        lines
    }
}

pub fn render_result(outcome: &UploadOutcome, target: ImportTarget) -> ResultPanel {
    match outcome {
        UploadOutcome::Success(ImportSummary::Categories(summary)) => categories_success(summary),
        UploadOutcome::Success(ImportSummary::Transactions(summary)) => {
            transactions_success(summary)
        }
        UploadOutcome::Failure(failure) => render_failure(failure, target),
    }
}

fn categories_success(summary: &CategoriesImportSummary) -> ResultPanel {
    ResultPanel {
        tone: Tone::Success,
        heading: "Import Successful!",
        message: None,
        counters: vec![
            Counter {
                label: "Categories Created",
                value: summary.categories_created,
                emphasis: Emphasis::Positive,
            },
            Counter {
                label: "Duplicates Skipped",
                value: summary.categories_skipped,
                emphasis: Emphasis::Info,
            },
            Counter {
                label: "Groups Processed",
                value: summary.groups_processed,
                emphasis: Emphasis::Neutral,
            },
            Counter {
                label: "Types Processed",
                value: summary.types_processed,
                emphasis: Emphasis::Neutral,
            },
        ],
        error_summary: Vec::new(),
        error_details: Vec::new(),
        hidden_errors: 0,
        hints: Vec::new(),
        links: vec![Link {
            label: "View Categories",
            path: ImportTarget::Categories.view_path(),
        }],
        retry_label: "Import Another File",
    }
}

fn transactions_success(summary: &TransactionsImportSummary) -> ResultPanel {
    let (error_details, hidden_errors) = cap_details(&summary.error_details);
    let error_summary = if summary.error_details.is_empty() {
        Vec::new()
    } else {
        summary_lines(summary.error_summary.as_ref())
    };

    ResultPanel {
        tone: if summary.transactions_created > 0 {
            Tone::Success
        } else {
            Tone::Warning
        },
        heading: "Import Completed!",
        message: None,
        counters: vec![
            Counter {
                label: "Transactions Created",
                value: summary.transactions_created,
                emphasis: Emphasis::Positive,
            },
            Counter {
                label: "Duplicates Skipped",
                value: summary.transactions_skipped,
                emphasis: Emphasis::Info,
            },
            Counter {
                label: "Errors",
                value: summary.errors,
                emphasis: if summary.errors > 0 {
                    Emphasis::Negative
                } else {
                    Emphasis::Muted
                },
            },
        ],
        error_summary,
        error_details,
        hidden_errors,
        hints: Vec::new(),
        links: vec![Link {
            label: "View Transactions",
            path: ImportTarget::Transactions.view_path(),
        }],
        retry_label: "Import Another File",
    }
}

fn render_failure(failure: &ImportFailure, target: ImportTarget) -> ResultPanel {
    let (error_details, hidden_errors) = cap_details(&failure.error_details);
    let (hints, links) = match target {
        ImportTarget::Categories => (Vec::new(), Vec::new()),
        ImportTarget::Transactions => (
            vec![
                "Categories must already exist - import categories first",
                "Check that your CSV has the required headers",
                "Verify date format is MM/DD/YYYY or YYYY-MM-DD",
                "Ensure amounts are in valid format ($100.50 or -50.00)",
            ],
            vec![Link {
                label: "Import Categories First",
                path: "/categories/import",
            }],
        ),
    };

    ResultPanel {
        tone: Tone::Danger,
        heading: "Import Failed",
        message: Some(failure.message.clone()),
        counters: Vec::new(),
        error_summary: summary_lines(failure.error_summary.as_ref()),
        error_details,
        hidden_errors,
        hints,
        links,
        retry_label: "Try Again",
    }
}

fn cap_details(details: &[String]) -> (Vec<String>, usize) {
    let shown = details.iter().take(MAX_ERROR_DETAILS).cloned().collect();
    (shown, details.len().saturating_sub(MAX_ERROR_DETAILS))
}

fn summary_lines(summary: Option<&ErrorSummary>) -> Vec<(String, u64)> {
    summary
        .map(|summary| {
            summary
                .iter()
                .map(|(kind, count)| (kind.replace('_', " "), *count))
                .collect()
        })
        .unwrap_or_default()
}
