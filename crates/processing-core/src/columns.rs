//! Metric column discovery and the user's column selection.

use tracksync_data_model::row::is_reserved_field;
use tracksync_data_model::table::DataTable;

/// Share of rows that must coerce to a number for a column to be plotted.
pub const NUMERIC_COVERAGE: f64 = 0.5;

/// A metric column: coerced values for every row, NaN where not numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub key: String,
    pub values: Vec<f64>,
}

/// All plottable columns of a table, in header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    /// Scan every non-reserved header field and keep the numeric ones.
    ///
    /// A field is eligible when strictly more than half of the rows coerce
    /// to a number (NaN does not count; infinities do).
    pub fn scan(table: &DataTable) -> Self {
        let threshold = table.len() as f64 * NUMERIC_COVERAGE;

        let columns = table
            .headers()
            .iter()
            .filter(|key| !is_reserved_field(key))
            .filter_map(|key| {
                let values = table.numbers(key);
                let numeric = values.iter().filter(|v| !v.is_nan()).count();
                (numeric as f64 > threshold).then(|| Column {
                    key: key.clone(),
                    values,
                })
            })
            .collect();

        Self { columns }
    }

    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.key.as_str())
    }

    pub fn first(&self) -> Option<&Column> {
        self.columns.first()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Ordered, duplicate-free set of selected column keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    keys: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection made of those `preferred` keys that exist in `columns`.
    pub fn preferred(columns: &ColumnSet, preferred: &[String]) -> Self {
        let mut selection = Self::new();
        for key in preferred {
            if columns.contains(key) {
                selection.add(key);
            }
        }
        selection
    }

    /// Add `key` if absent. Returns `true` when the selection changed.
    pub fn add(&mut self, key: &str) -> bool {
        if self.contains(key) {
            return false;
        }
        self.keys.push(key.to_string());
        true
    }

    /// Remove `key` if present. Returns `true` when the selection changed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| k != key);
        self.keys.len() != before
    }

    /// Flip membership of `key`.
    pub fn toggle(&mut self, key: &str) {
        if !self.remove(key) {
            self.add(key);
        }
    }

    /// Replace the whole selection, dropping duplicates.
    pub fn set<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keys.clear();
        for key in keys {
            self.add(key.as_ref());
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Columns to draw: the selected keys that are eligible, or the first
    /// eligible column when the selection is empty. The fallback is never
    /// stored.
    pub fn resolve<'a>(&self, columns: &'a ColumnSet) -> Vec<&'a Column> {
        let chosen: Vec<&Column> = self.keys.iter().filter_map(|k| columns.get(k)).collect();
        if !self.keys.is_empty() {
            return chosen;
        }
        columns.first().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataTable {
        DataTable::parse(
            "frame,time_sec,speed,label,sparse,source,accel\n\
             0,0.0,1.0,a,,x,0.5\n\
             1,0.1,2.0,b,,x,0.6\n\
             2,0.2,n/a,c,9,x,0.7\n\
             3,0.3,4.0,d,,x,oops\n",
        )
        .unwrap()
    }

    #[test]
    fn test_scan_keeps_numeric_non_reserved_columns_in_order() {
        let columns = ColumnSet::scan(&sample());
        let keys: Vec<&str> = columns.keys().collect();
        assert_eq!(keys, vec!["speed", "accel"]);

        let speed = columns.get("speed").unwrap();
        assert_eq!(speed.values.len(), 4);
        assert!(speed.values[2].is_nan());
    }

    #[test]
    fn test_scan_requires_strict_majority() {
        let table = DataTable::parse("frame,half\n0,1\n1,\n2,3\n3,\n").unwrap();
        assert!(ColumnSet::scan(&table).is_empty());
    }

    #[test]
    fn test_scan_empty_table() {
        let table = DataTable::parse("frame,speed\n").unwrap();
        assert!(ColumnSet::scan(&table).is_empty());
    }

    #[test]
    fn test_selection_is_idempotent() {
        let mut selection = Selection::new();
        assert!(selection.add("speed"));
        assert!(!selection.add("speed"));
        assert!(selection.add("accel"));
        assert_eq!(selection.keys(), ["speed", "accel"]);

        assert!(selection.remove("speed"));
        assert!(!selection.remove("speed"));
        assert_eq!(selection.keys(), ["accel"]);

        selection.toggle("speed");
        selection.toggle("accel");
        assert_eq!(selection.keys(), ["speed"]);

        selection.set(["a", "b", "a"]);
        assert_eq!(selection.keys(), ["a", "b"]);
    }

    #[test]
    fn test_empty_selection_falls_back_to_first_column() {
        let columns = ColumnSet::scan(&sample());
        let mut selection = Selection::new();

        let resolved = selection.resolve(&columns);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].key, "speed");
        assert!(selection.is_empty());

        selection.add("accel");
        let resolved = selection.resolve(&columns);
        assert_eq!(resolved[0].key, "accel");
    }

    #[test]
    fn test_preferred_selection_skips_ineligible_keys() {
        let columns = ColumnSet::scan(&sample());
        let preferred = vec!["label".to_string(), "accel".to_string(), "pfgi".to_string()];
        let selection = Selection::preferred(&columns, &preferred);
        assert_eq!(selection.keys(), ["accel"]);
    }
}
