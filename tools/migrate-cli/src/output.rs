//! Output formatting for the CLI.

use cart_migrate_core::{MatchStats, MigrationReport};
use console::style;
use serde::Serialize;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print the end-of-run summary.
    pub fn summary(&self, report: &MigrationReport) {
        let summary = RunSummary::from(report);
        if self.json {
            self.json(&summary);
            return;
        }

        self.header("Migration summary");
        self.kv("source records", &summary.source_count.to_string());
        self.kv("normalized", &summary.normalized_count.to_string());
        self.kv("failed", &summary.failed_count.to_string());
        self.kv("ambiguous options", &summary.match_stats.ambiguous.to_string());
        self.kv("unmatched options", &summary.match_stats.unmatched.to_string());
        self.kv("migrated", &summary.migrated.to_string());

        if !summary.failures.is_empty() {
            println!();
            for failure in &summary.failures {
                self.list_item(&failure.describe());
            }
        }

        println!();
        if report.is_complete() {
            self.success(&format!("Migrated {} products", summary.migrated));
        } else {
            self.warn(&format!(
                "Migrated {} products, {} records skipped",
                summary.migrated, summary.failed_count
            ));
        }
    }
}

/// Serializable view of a [`MigrationReport`].
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub source_count: usize,
    pub normalized_count: usize,
    pub failed_count: usize,
    pub migrated: usize,
    pub match_stats: MatchStats,
    pub failures: Vec<FailureSummary>,
}

#[derive(Debug, Serialize)]
pub struct FailureSummary {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    pub reason: String,
}

impl FailureSummary {
    fn describe(&self) -> String {
        match &self.record_id {
            Some(id) => format!("record {} (#{}): {}", id, self.index, self.reason),
            None => format!("record #{}: {}", self.index, self.reason),
        }
    }
}

impl From<&MigrationReport> for RunSummary {
    fn from(report: &MigrationReport) -> Self {
        Self {
            source_count: report.source_count,
            normalized_count: report.normalized_count,
            failed_count: report.failed_count(),
            migrated: report.migrated,
            match_stats: report.match_stats,
            failures: report
                .failures
                .iter()
                .map(|f| FailureSummary {
                    index: f.index,
                    record_id: f.record_id.clone(),
                    reason: f.error.to_string(),
                })
                .collect(),
        }
    }
}
