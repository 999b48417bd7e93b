use serde::{Deserialize, Serialize};

/// Lifecycle state of a submitted query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryState {
    Submitted,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl QueryState {
    /// Terminal states admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QueryState::Succeeded | QueryState::Failed | QueryState::Cancelled
        )
    }
}

/// One poll observation of a query execution.
#[derive(Debug, Clone)]
pub struct QueryStatus {
    pub state: QueryState,
    /// Service-reported state change reason, populated on failure.
    pub reason: Option<String>,
}

/// Handle for one submitted query.
///
/// Owned and mutated only by the poll loop that resolves it; consumed once
/// into a [`QueryOutcome`].
#[derive(Debug, Clone)]
pub struct QueryHandle {
    /// Opaque execution identifier returned on submission.
    pub id: String,
    /// Last observed lifecycle state.
    pub state: QueryState,
}

impl QueryHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: QueryState::Submitted,
        }
    }
}

/// Terminal outcome of a query, produced exactly once per handle.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    Succeeded { table: ResultTable },
    Failed { reason: String },
    Cancelled,
}

/// One database entry from the data catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub name: String,
    pub description: Option<String>,
}

/// Tabular query result.
///
/// Invariant: every row has exactly `columns.len()` cells. Missing values
/// are stored as empty strings, never as NULL markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    /// Build a table from the raw result payload.
    ///
    /// Athena returns the column header as the first result row rather than
    /// as separate metadata, so the first raw row becomes `columns` and the
    /// remainder become data rows, padded or truncated to the header width.
    pub fn from_raw_rows(raw: Vec<Vec<Option<String>>>) -> Self {
        let mut raw = raw.into_iter();

        let columns: Vec<String> = match raw.next() {
            Some(header) => header.into_iter().map(Option::unwrap_or_default).collect(),
            None => {
                return Self {
                    columns: Vec::new(),
                    rows: Vec::new(),
                }
            }
        };

        let rows = raw
            .map(|row| {
                let mut cells: Vec<String> =
                    row.into_iter().map(Option::unwrap_or_default).collect();
                cells.resize(columns.len(), String::new());
                cells
            })
            .collect();

        Self { columns, rows }
    }

    /// Number of data rows (the header is not a data row).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn terminal_states() {
        assert!(QueryState::Succeeded.is_terminal());
        assert!(QueryState::Failed.is_terminal());
        assert!(QueryState::Cancelled.is_terminal());
        assert!(!QueryState::Submitted.is_terminal());
        assert!(!QueryState::Running.is_terminal());
    }

    #[test]
    fn handle_starts_submitted() {
        let handle = QueryHandle::new("q-1");
        assert_eq!(handle.id, "q-1");
        assert_eq!(handle.state, QueryState::Submitted);
    }

    #[test]
    fn first_raw_row_becomes_header() {
        let table = ResultTable::from_raw_rows(vec![
            vec![cell("id"), cell("name")],
            vec![cell("1"), cell("alice")],
            vec![cell("2"), cell("bob")],
        ]);

        assert_eq!(table.columns, vec!["id", "name"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1], vec!["2", "bob"]);
    }

    #[test]
    fn null_cells_become_empty_strings() {
        let table = ResultTable::from_raw_rows(vec![
            vec![cell("a"), cell("b")],
            vec![cell("1"), None],
        ]);

        assert_eq!(table.rows[0], vec!["1", ""]);
    }

    #[test]
    fn short_rows_are_padded_to_header_width() {
        let table = ResultTable::from_raw_rows(vec![
            vec![cell("a"), cell("b"), cell("c")],
            vec![cell("1")],
        ]);

        assert_eq!(table.rows[0], vec!["1", "", ""]);
    }

    #[test]
    fn long_rows_are_truncated_to_header_width() {
        let table = ResultTable::from_raw_rows(vec![
            vec![cell("a")],
            vec![cell("1"), cell("extra")],
        ]);

        assert_eq!(table.rows[0], vec!["1"]);
    }

    #[test]
    fn empty_payload_yields_empty_table() {
        let table = ResultTable::from_raw_rows(vec![]);
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn result_table_serde_roundtrip() {
        let table = ResultTable::from_raw_rows(vec![
            vec![cell("id"), cell("name")],
            vec![cell("1"), None],
        ]);

        let json = serde_json::to_string(&table).expect("serialize");
        let parsed: ResultTable = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(parsed.columns, table.columns);
        assert_eq!(parsed.rows, table.rows);
    }
}
