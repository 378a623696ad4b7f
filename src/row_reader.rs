use log::trace;

use crate::tokenizer::{DelimitedTokenizer, Token};
use crate::transform_row::{Row, TransformRow};

/// Groups the tokens of a `DelimitedTokenizer` into rows.
pub struct RowReader<'txt, 'tr> {
    tokens: DelimitedTokenizer<'txt>,
    transform: Option<&'tr dyn TransformRow>,
    row_idx: usize, // index of the next row that is started
}

impl<'txt, 'tr> RowReader<'txt, 'tr> {
    pub fn new(tokens: DelimitedTokenizer<'txt>, transform: Option<&'tr dyn TransformRow>) -> Self {
        Self {
            tokens,
            transform,
            row_idx: 0,
        }
    }

    /// Number of rows started so far, including skipped ones.
    pub fn rows_read(&self) -> usize {
        self.row_idx
    }

    fn read_row(&mut self) -> Option<Row> {
        let mut token = self.tokens.next()?; // None, once EndOfInput was handed out
        if token == Token::EndOfInput {
            return None;
        }

        let mut row = Row::new();
        while let Token::Field(field) = token {
            row.push(String::from(field.as_str()));
            token = match self.tokens.next() {
                Some(t) => t,
                None => break,
            };
        }
        Some(row)
    }
}

impl<'txt, 'tr> Iterator for RowReader<'txt, 'tr> {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let row = self.read_row()?;
            let idx = self.row_idx;
            self.row_idx += 1;
            trace!("row: {}; fields: {:?}", idx, &row);

            match self.transform {
                None => return Some(row),
                Some(t) => match t.transform(row, idx) {
                    Some(r) => return Some(r),
                    None => trace!("row: {} skipped by {}", idx, t.get_self_info()),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform_row::{RowFn, SkipRowsStartingWith};

    fn rows(inp: &str) -> Vec<Row> {
        RowReader::new(DelimitedTokenizer::csv(inp), None).collect()
    }

    #[test]
    fn empty() {
        assert!(rows("").is_empty());
        assert!(rows("\r\n").is_empty());
    }

    #[test]
    fn multiple_rows() {
        assert_eq!(
            rows("a,b,c\n1,2,3\n"),
            vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]
        );
    }

    #[test]
    fn blank_line_is_a_row_with_one_empty_field() {
        assert_eq!(rows("a\n\nb"), vec![vec!["a"], vec![""], vec!["b"]]);
    }

    #[test]
    fn trailing_delimiter_gives_trailing_empty_field() {
        assert_eq!(rows("a,\nb,"), vec![vec!["a", ""], vec!["b", ""]]);
    }

    #[test]
    fn transform_skips_and_replaces() {
        let t = SkipRowsStartingWith::new("#");
        let res: Vec<Row> =
            RowReader::new(DelimitedTokenizer::csv("#c\na\n#d\nb"), Some(&t)).collect();
        assert_eq!(res, vec![vec!["a"], vec!["b"]]);

        let prefixed = RowFn(|row: Row, i: usize| {
            Some(row.into_iter().map(|f| format!("{i}:{f}")).collect::<Row>())
        });
        let res: Vec<Row> = RowReader::new(DelimitedTokenizer::csv("a,b\nc"), Some(&prefixed)).collect();
        assert_eq!(res, vec![vec!["0:a", "0:b"], vec!["1:c"]]);
    }

    #[test]
    fn skipped_rows_still_consume_an_index() {
        let odd = RowFn(|row: Row, i: usize| (i % 2 == 1).then_some(row));
        let mut rr = RowReader::new(DelimitedTokenizer::csv("a\nb\nc\nd\ne"), Some(&odd));
        let res: Vec<Row> = rr.by_ref().collect();
        assert_eq!(res, vec![vec!["b"], vec!["d"]]);
        assert_eq!(rr.rows_read(), 5);
    }
}
