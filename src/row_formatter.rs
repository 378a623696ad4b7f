use crate::tokenizer::QUOTE_CHAR;

/// Writes rows as delimited text. A field is enclosed in quotes, if it contains the delimiter, a quote or a
/// line ending. Quotes inside enclosed fields are doubled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFormatter {
    pub delim_char: char,
}

impl RowFormatter {
    pub fn new(delim: char) -> Self {
        Self { delim_char: delim }
    }
    pub fn csv() -> Self {
        RowFormatter::new(',')
    }

    pub fn needs_enclosing(&self, field: &str) -> bool {
        field.contains(|c: char| c == self.delim_char || c == QUOTE_CHAR || c == '\n' || c == '\r')
    }

    pub fn format_field(&self, field: &str, out: &mut String) {
        if self.needs_enclosing(field) {
            out.push(QUOTE_CHAR);
            for c in field.chars() {
                if c == QUOTE_CHAR {
                    out.push(QUOTE_CHAR);
                }
                out.push(c);
            }
            out.push(QUOTE_CHAR);
        } else {
            out.push_str(field);
        }
    }

    pub fn format_row<S: AsRef<str>>(&self, row: &[S]) -> String {
        let mut out = String::new();
        self.write_row(row, &mut out);
        out
    }

    /// Rows are joined by `\n`, without a trailing line ending.
    pub fn format_rows<S: AsRef<str>>(&self, rows: &[Vec<S>]) -> String {
        let mut out = String::new();
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.write_row(row, &mut out);
        }
        out
    }

    fn write_row<S: AsRef<str>>(&self, row: &[S], out: &mut String) {
        for (i, field) in row.iter().enumerate() {
            if i > 0 {
                out.push(self.delim_char);
            }
            self.format_field(field.as_ref(), out);
        }
    }
}

impl Default for RowFormatter {
    fn default() -> Self {
        RowFormatter::csv()
    }
}
