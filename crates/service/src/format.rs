//! Rendering of query results and catalog listings for tool responses.

use crate::result::{DatabaseInfo, ResultTable};

/// Fixed message for a result payload with no rows at all.
pub const NO_RESULTS_MESSAGE: &str = "No results found";

/// Fixed message for an empty data catalog.
pub const NO_DATABASES_MESSAGE: &str = "No databases found.";

/// Render a result table as a pipe-delimited Markdown table.
///
/// Header row, separator row, then at most `max_rows` data rows. When rows
/// are dropped a trailing note states how many were omitted.
pub fn format_result_table(table: &ResultTable, max_rows: usize) -> String {
    if table.columns.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }

    let mut out = String::new();

    out.push_str("| ");
    out.push_str(&table.columns.join(" | "));
    out.push_str(" |\n");

    out.push_str("| ");
    out.push_str(&vec!["---"; table.columns.len()].join(" | "));
    out.push_str(" |\n");

    for row in table.rows.iter().take(max_rows) {
        out.push_str("| ");
        out.push_str(&row.join(" | "));
        out.push_str(" |\n");
    }

    if table.rows.len() > max_rows {
        out.push_str(&format!(
            "\n... and {} more rows",
            table.rows.len() - max_rows
        ));
    }

    out
}

/// Render the database catalog as a bulleted list with optional descriptions.
pub fn format_database_list(databases: &[DatabaseInfo]) -> String {
    if databases.is_empty() {
        return NO_DATABASES_MESSAGE.to_string();
    }

    let lines: Vec<String> = databases
        .iter()
        .map(|db| match db.description.as_deref() {
            Some(desc) if !desc.is_empty() => format!("- **{}** - {}", db.name, desc),
            _ => format!("- **{}**", db.name),
        })
        .collect();

    format!(
        "Available databases ({} total):\n\n{}",
        databases.len(),
        lines.join("\n")
    )
}

/// Truncate a SQL statement for a log line.
pub fn truncate_for_log(sql: &str, max_len: usize) -> String {
    match sql.char_indices().nth(max_len) {
        Some((idx, _)) => format!("{}...", &sql[..idx]),
        None => sql.to_string(),
    }
}
