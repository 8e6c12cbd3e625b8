//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};

/// What `check` found in one catalog.
pub struct CatalogSummary {
    /// Catalog file, as given on the command line.
    pub path: String,
    /// Distinct translated messages after normalization.
    pub messages: usize,
    /// Messages with plural forms.
    pub plurals: usize,
    /// Declared `nplurals`, if any.
    pub nplurals: Option<usize>,
    /// Compiled plural rule, if any.
    pub rule: Option<String>,
}

/// Format catalog summaries as an ASCII table.
pub fn format_summary_table(summaries: &[CatalogSummary]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Catalog", "Messages", "Plural", "Forms", "Rule"]);

    for summary in summaries {
        table.add_row(vec![
            summary.path.clone(),
            summary.messages.to_string(),
            summary.plurals.to_string(),
            summary
                .nplurals
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
            summary.rule.clone().unwrap_or_else(|| "n != 1".to_string()),
        ]);
    }

    table
}

/// Format `(count, plural index)` pairs as an ASCII table.
pub fn format_plural_table(rows: &[(u64, usize)]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["n", "Form"]);

    for (n, index) in rows {
        table.add_row(vec![n.to_string(), index.to_string()]);
    }

    table
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}
