use indexmap::IndexMap;
use serde_json::Value;

/// Minimal column-oriented table, the shape tabular-data providers hand to
/// the figure pipeline. Columns keep their insertion order; cells are
/// free-form JSON values so numeric and string data mix freely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: IndexMap<String, Vec<Value>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from row records, e.g. parsed from a JSON array of
    /// objects. Ragged input is squared off: a key absent from some record
    /// becomes a null cell in that row.
    pub fn from_records(records: &[serde_json::Map<String, Value>]) -> Self {
        let mut columns: IndexMap<String, Vec<Value>> = IndexMap::new();
        for record in records {
            for key in record.keys() {
                columns.entry(key.clone()).or_default();
            }
        }
        for (row, record) in records.iter().enumerate() {
            for (name, cells) in columns.iter_mut() {
                debug_assert_eq!(cells.len(), row);
                cells.push(record.get(name).cloned().unwrap_or(Value::Null));
            }
        }
        Self { columns }
    }

    /// Insert or replace a column. Length mismatches are the caller's
    /// responsibility; the pipeline only ever derives columns row-for-row.
    pub fn insert_column(&mut self, name: impl Into<String>, cells: Vec<Value>) {
        self.columns.insert(name.into(), cells);
    }

    pub fn with_column(mut self, name: impl Into<String>, cells: Vec<Value>) -> Self {
        self.insert_column(name, cells);
        self
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of rows (length of the first column; 0 for a columnless table).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, cells)| cells.len())
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<serde_json::Map<String, Value>> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn test_from_records_builds_columns() {
        let table = Table::from_records(&records(json!([
            {"Country": "France", "Data": 1.5},
            {"Country": "Germany", "Data": 2.0}
        ])));
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column("Country").unwrap(),
            &[json!("France"), json!("Germany")]
        );
        assert_eq!(table.column("Data").unwrap(), &[json!(1.5), json!(2.0)]);
    }

    #[test]
    fn test_from_records_squares_off_ragged_input() {
        let table = Table::from_records(&records(json!([
            {"Country": "France"},
            {"Country": "Germany", "Data": 2.0}
        ])));
        assert_eq!(table.column("Data").unwrap(), &[json!(null), json!(2.0)]);
    }

    #[test]
    fn test_with_column_replaces() {
        let table = Table::new()
            .with_column("Country", vec![json!("France")])
            .with_column("Country", vec![json!("Japan")]);
        assert_eq!(table.column("Country").unwrap(), &[json!("Japan")]);
        assert_eq!(table.column_names().count(), 1);
    }
}
