use crate::data::table::{ColumnSet, ParsedTable, RowObject};
use crate::row_reader::RowReader;
use crate::tokenizer::DelimitedTokenizer;
use crate::transform_row::{Row, TransformRow};

/// Parses delimited text either into raw rows, or, using the first row as header, into row objects.
/// Parsing never fails; malformed input at worst produces odd fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableParser {
    pub delim_char: char,
}

impl TableParser {
    pub fn new(delim: char) -> Self {
        Self { delim_char: delim }
    }
    pub fn csv() -> Self {
        TableParser::new(',')
    }
    pub fn tsv() -> Self {
        TableParser::new('\t')
    }

    pub fn tokenize<'txt>(&self, text: &'txt str) -> DelimitedTokenizer<'txt> {
        DelimitedTokenizer::new(text, self.delim_char)
    }

    pub fn read_rows<'txt, 'tr>(
        &self,
        text: &'txt str,
        transform: Option<&'tr dyn TransformRow>,
    ) -> RowReader<'txt, 'tr> {
        RowReader::new(self.tokenize(text), transform)
    }

    pub fn parse_rows(&self, text: &str) -> Vec<Row> {
        self.read_rows(text, None).collect()
    }

    /// The transform sees the physical row index, i.e. the first row of `text` has index 0.
    pub fn parse_rows_with(&self, text: &str, transform: &dyn TransformRow) -> Vec<Row> {
        self.read_rows(text, Some(transform)).collect()
    }

    pub fn parse(&self, text: &str) -> ParsedTable {
        self.parse_with(text, |row_obj, _, _| Some(row_obj))
    }

    /// Like `parse`, but every row object is passed through `f` together with its data row index (the
    /// first row after the header has index 0) and the column set. Returning `None` drops the row.
    pub fn parse_with<F>(&self, text: &str, mut f: F) -> ParsedTable
    where
        F: FnMut(RowObject, usize, &ColumnSet) -> Option<RowObject>,
    {
        let mut rows = self.read_rows(text, None);
        let columns = match rows.next() {
            Some(header) => ColumnSet::new(header),
            None => return ParsedTable::default(),
        };

        let rows = rows
            .enumerate()
            .filter_map(|(i, row)| f(columns.to_row_object(&row), i, &columns))
            .collect();
        ParsedTable { rows, columns }
    }

    /// Header mode, with a row transform applied to the raw data rows before they become row objects.
    /// The header row itself is never transformed; the transform sees data row indices.
    pub fn parse_transformed(&self, text: &str, transform: &dyn TransformRow) -> ParsedTable {
        let mut rows = self.read_rows(text, None);
        let columns = match rows.next() {
            Some(header) => ColumnSet::new(header),
            None => return ParsedTable::default(),
        };

        let rows = rows
            .enumerate()
            .filter_map(|(i, row)| transform.transform(row, i))
            .map(|row| columns.to_row_object(&row))
            .collect();
        ParsedTable { rows, columns }
    }
}

impl Default for TableParser {
    fn default() -> Self {
        TableParser::csv()
    }
}
