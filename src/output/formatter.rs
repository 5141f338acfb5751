//! Report formatters for console, JSON, and Markdown output

use crate::analysis::engine::AnalysisReport;
use crate::analysis::scorers::Category;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::Colorize;

/// Trait for rendering analysis reports.
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

/// Console formatter with colored score bands.
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for API integration and structured data.
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for shareable reports.
pub struct MarkdownFormatter;

/// Coordinates the formatters behind one format selector.
pub struct ReportGenerator {
    use_colors: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint_score(&self, score: u8) -> String {
        let text = format!("{:>3}/100", score);
        if !self.use_colors {
            return text;
        }
        match score {
            80..=100 => text.green().bold().to_string(),
            60..=79 => text.yellow().bold().to_string(),
            _ => text.red().bold().to_string(),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut out = String::new();

        out.push_str("📊 Profile Analysis Report\n");
        out.push_str(&format!(
            "\nOverall Score: {}\n",
            self.paint_score(report.overall_score)
        ));

        out.push_str("\nCategories:\n");
        for category in Category::ALL {
            if let Some(result) = report.categories.get(&category) {
                out.push_str(&format!(
                    "  {} {:<16} {}\n",
                    self.paint_score(result.score),
                    category.label(),
                    result.feedback
                ));
            }
        }

        if !report.improvements.is_empty() {
            out.push_str("\n💡 Top Improvements:\n");
            for (i, item) in report.improvements.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, item));
            }
        }

        Ok(out)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(rendered)
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut out = String::new();

        out.push_str("# Profile Analysis Report\n\n");
        out.push_str(&format!("**Overall Score:** {}/100\n\n", report.overall_score));

        out.push_str("## Categories\n\n");
        out.push_str("| Category | Score | Feedback |\n");
        out.push_str("|----------|-------|----------|\n");
        for category in Category::ALL {
            if let Some(result) = report.categories.get(&category) {
                out.push_str(&format!(
                    "| {} | {} | {} |\n",
                    category.label(),
                    result.score,
                    result.feedback
                ));
            }
        }

        let with_suggestions: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|category| {
                report
                    .categories
                    .get(category)
                    .map(|r| !r.suggestions.is_empty())
                    .unwrap_or(false)
            })
            .collect();
        if !with_suggestions.is_empty() {
            out.push_str("\n## Suggestions\n");
            for category in with_suggestions {
                out.push_str(&format!("\n### {}\n\n", category.label()));
                for suggestion in &report.categories[&category].suggestions {
                    out.push_str(&format!("- {}\n", suggestion));
                }
            }
        }

        if !report.improvements.is_empty() {
            out.push_str("\n## Top Improvements\n\n");
            for (i, item) in report.improvements.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, item));
            }
        }

        Ok(out)
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn format(&self, format: OutputFormat, report: &AnalysisReport) -> Result<String> {
        match format {
            OutputFormat::Console => {
                ConsoleFormatter::new(self.use_colors).format_report(report)
            }
            OutputFormat::Json => JsonFormatter::new(true).format_report(report),
            OutputFormat::Markdown => MarkdownFormatter.format_report(report),
        }
    }
}
