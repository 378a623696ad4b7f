use compact_str::CompactString;

pub const QUOTE_CHAR: char = '"';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Field(CompactString),
    EndOfRow,
    EndOfInput,
}

/// Mostly written with the csv rfc (https://tools.ietf.org/html/rfc4180) in mind, but lenient: it never fails.
/// Works for other single-character delimiters too (e.g. tab or pipe). The enclosure character is always `"`.
///
/// The tokenizer works over the whole input text and hands out one token at a time. After the last field it
/// yields exactly one `Token::EndOfInput`, then the iteration is over.
#[derive(Debug, Clone)]
pub struct DelimitedTokenizer<'txt> {
    text: &'txt str, // already stripped of one trailing line ending
    pub delim_char: char,
    pos: usize,      // byte offset of the next unread char
    eof: bool,       // the last token was followed by the end of input
    eol: bool,       // the last token was followed by a line ending
    finished: bool,  // EndOfInput was handed out
}

impl<'txt> DelimitedTokenizer<'txt> {
    pub fn new(text: &'txt str, delim: char) -> Self {
        let text = strip_trailing_line_ending(text);
        DelimitedTokenizer {
            text,
            delim_char: delim,
            pos: 0,
            eof: text.is_empty(),
            eol: false,
            finished: false,
        }
    }
    pub fn csv(text: &'txt str) -> Self {
        DelimitedTokenizer::new(text, ',')
    }
    pub fn tab(text: &'txt str) -> Self {
        DelimitedTokenizer::new(text, '\t')
    }

    fn next_token(&mut self) -> Token {
        if self.eof {
            return Token::EndOfInput;
        }
        if self.eol {
            self.eol = false;
            return Token::EndOfRow;
        }

        let text = self.text;
        let start = self.pos;
        if text[start..].starts_with(QUOTE_CHAR) {
            return Token::Field(self.quoted_field(start + QUOTE_CHAR.len_utf8()));
        }

        // Regular, un-enclosed field. We stay here until the delimiter, a line ending or the end of input.
        for (offset, c) in text[start..].char_indices() {
            let i = start + offset;
            if c == '\n' || c == '\r' {
                self.pos = i + 1;
                self.consume_lf_after_cr(c);
                self.eol = true;
                return Token::Field(CompactString::new(&text[start..i]));
            }
            if c == self.delim_char {
                self.pos = i + c.len_utf8();
                return Token::Field(CompactString::new(&text[start..i]));
            }
        }

        self.eof = true;
        self.pos = text.len();
        Token::Field(CompactString::new(&text[start..]))
    }

    /// `from` points right behind the opening quote.
    fn quoted_field(&mut self, from: usize) -> CompactString {
        let text = self.text;
        let mut field = CompactString::default();
        let mut i = from;

        loop {
            match text[i..].find(QUOTE_CHAR) {
                None => {
                    // Unterminated enclosure. We close it implicitly at the end of input.
                    field.push_str(&text[i..]);
                    self.pos = text.len();
                    self.eof = true;
                    return field;
                }
                Some(offset) => {
                    let q = i + offset;
                    field.push_str(&text[i..q]);
                    if text[q + 1..].starts_with(QUOTE_CHAR) {
                        // escaped enclosure char
                        field.push(QUOTE_CHAR);
                        i = q + 2;
                    } else {
                        self.pos = q + 1;
                        break;
                    }
                }
            }
        }

        // Whatever stands between the closing quote and the next boundary is dropped, it never starts a new field.
        let rest_start = self.pos;
        for (offset, c) in text[rest_start..].char_indices() {
            let i = rest_start + offset;
            if c == '\n' || c == '\r' {
                self.pos = i + 1;
                self.consume_lf_after_cr(c);
                self.eol = true;
                return field;
            }
            if c == self.delim_char {
                self.pos = i + c.len_utf8();
                return field;
            }
        }
        self.pos = text.len();
        self.eof = true;
        field
    }

    // \r\n counts as one boundary
    fn consume_lf_after_cr(&mut self, c: char) {
        if c == '\r' && self.text[self.pos..].starts_with('\n') {
            self.pos += 1;
        }
    }
}

impl<'txt> Iterator for DelimitedTokenizer<'txt> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token == Token::EndOfInput {
            self.finished = true;
        }
        Some(token)
    }
}

/// Strips exactly one trailing `\n`, `\r` or `\r\n`.
pub fn strip_trailing_line_ending(text: &str) -> &str {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.strip_suffix('\r').unwrap_or(text)
}
