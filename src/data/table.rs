use indexmap::IndexMap;

use crate::transform_row::Row;

/// Header-mode representation of one data row. Keys are in column order.
pub type RowObject = IndexMap<String, String>;

/// The ordered column names of one parse, resolved once into a name -> index lookup.
/// If a name occurs more than once, it resolves to its last position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet {
    names: Vec<String>,
    index: IndexMap<String, usize>,
}

impl ColumnSet {
    pub fn new(names: Vec<String>) -> Self {
        let mut index = IndexMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            index.insert(name.clone(), i);
        }
        Self { names, index }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn name_at(&self, idx: usize) -> Option<&str> {
        self.names.get(idx).map(String::as_str)
    }

    /// Builds the row object for `row`. Absent or empty fields become `""`, extra fields are ignored.
    pub fn to_row_object(&self, row: &Row) -> RowObject {
        self.index
            .iter()
            .map(|(name, &i)| (name.clone(), row.get(i).cloned().unwrap_or_default()))
            .collect()
    }
}

impl From<Vec<String>> for ColumnSet {
    fn from(names: Vec<String>) -> Self {
        ColumnSet::new(names)
    }
}

impl PartialEq<Vec<&str>> for ColumnSet {
    fn eq(&self, other: &Vec<&str>) -> bool {
        self.names == *other
    }
}

/// Result of a header-mode parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    pub rows: Vec<RowObject>,
    pub columns: ColumnSet,
}

impl ParsedTable {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cs(names: &[&str]) -> ColumnSet {
        ColumnSet::new(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn index_lookup() {
        let c = cs(&["latitude", "longitude", "popup"]);
        assert_eq!(c.index_of("longitude"), Some(1));
        assert_eq!(c.index_of("Longitude"), None);
        assert_eq!(c.index_of(" popup"), None);
        assert_eq!(c.name_at(2), Some("popup"));
        assert_eq!(c.name_at(3), None);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn duplicate_name_resolves_to_last_position() {
        let c = cs(&["a", "b", "a"]);
        assert_eq!(c.index_of("a"), Some(2));
        assert_eq!(c.len(), 3);

        let obj = c.to_row_object(&vec!["1".into(), "2".into(), "3".into()]);
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.get("a").unwrap(), "3");
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn short_row_is_padded_long_row_is_cut() {
        let c = cs(&["a", "b", "c"]);
        let obj = c.to_row_object(&vec!["1".into()]);
        assert_eq!(
            obj.into_iter().collect::<Vec<_>>(),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "".to_string()),
                ("c".to_string(), "".to_string())
            ]
        );

        let obj = c.to_row_object(&vec!["1".into(), "2".into(), "3".into(), "4".into()]);
        assert_eq!(obj.len(), 3);
        assert_eq!(obj.get("c").unwrap(), "3");
    }
}
