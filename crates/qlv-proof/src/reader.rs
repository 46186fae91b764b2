use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::{ProofError, ProofResult};

/// Cursor over Ion text that understands just enough of the grammar to read
/// a flat list of blobs. Whitespace, comments and annotations are skipped
/// between tokens; inside a blob only whitespace is allowed.
///
/// Every failure is reported against the index of the list element being
/// read when it happened.
#[derive(Debug, Clone, Copy)]
pub struct IonTextReader<'a> {
    text: &'a [u8],
    offset: usize,
}

impl<'a> IonTextReader<'a> {
    /// Creates a new cursor over the provided Ion text.
    pub fn new(text: &'a str) -> Self {
        Self {
            text: text.as_bytes(),
            offset: 0,
        }
    }

    /// Returns `true` once only whitespace and comments are left.
    pub fn at_end(&mut self) -> bool {
        self.skip_trivia();
        self.offset >= self.text.len()
    }

    fn peek(&self) -> Option<u8> {
        self.text.get(self.offset).copied()
    }

    fn starts_with(&self, token: &[u8]) -> bool {
        self.text[self.offset..].starts_with(token)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.offset += 1;
        }
    }

    /// Skips whitespace, `// line` comments and `/* block */` comments.
    ///
    /// An unterminated block comment swallows the rest of the text.
    fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            if self.starts_with(b"//") {
                let rest = &self.text[self.offset..];
                self.offset += rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
            } else if self.starts_with(b"/*") {
                let rest = &self.text[self.offset + 2..];
                self.offset += 2 + rest
                    .windows(2)
                    .position(|w| w == b"*/")
                    .map_or(rest.len(), |end| end + 2);
            } else {
                return;
            }
        }
    }

    /// Length of the symbol token at the cursor, if any: an identifier or a
    /// single-quoted symbol.
    fn symbol_len(&self) -> Option<usize> {
        let rest = &self.text[self.offset..];
        match rest.first()? {
            b'\'' => {
                let mut i = 1;
                while i < rest.len() {
                    match rest[i] {
                        b'\\' => i += 2,
                        b'\'' => return Some(i + 1),
                        _ => i += 1,
                    }
                }
                None
            }
            b if b.is_ascii_alphabetic() || *b == b'_' || *b == b'$' => Some(
                rest.iter()
                    .position(|b| !(b.is_ascii_alphanumeric() || *b == b'_' || *b == b'$'))
                    .unwrap_or(rest.len()),
            ),
            _ => None,
        }
    }

    /// Skips comments and any `annotation::` prefixes before a value.
    ///
    /// A symbol not followed by `::` is a value of its own and is left in
    /// place.
    fn skip_annotations(&mut self) {
        loop {
            self.skip_trivia();
            let start = self.offset;
            let Some(len) = self.symbol_len() else {
                return;
            };
            self.offset += len;
            self.skip_trivia();
            if self.starts_with(b"::") {
                self.offset += 2;
            } else {
                self.offset = start;
                return;
            }
        }
    }

    /// Consumes the opening `[` of a list.
    pub fn step_in(&mut self) -> ProofResult<()> {
        self.skip_annotations();
        match self.peek() {
            Some(b'[') => {
                self.offset += 1;
                Ok(())
            }
            None => Err(ProofError::decode(0, "empty input, expected a list")),
            Some(_) => Err(ProofError::decode(0, "top-level value is not a list")),
        }
    }

    /// Consumes the closing `]` of an empty list, returning `true` if the
    /// list had no elements.
    pub fn step_out_if_empty(&mut self) -> bool {
        self.skip_trivia();
        if self.peek() == Some(b']') {
            self.offset += 1;
            return true;
        }
        false
    }

    /// Reads the blob at list index `index` and returns its decoded bytes.
    pub fn read_blob(&mut self, index: usize) -> ProofResult<Vec<u8>> {
        self.skip_annotations();
        if !self.starts_with(b"{{") {
            return Err(match self.peek() {
                None | Some(b']') => ProofError::decode(index, "expected a blob element"),
                Some(_) => ProofError::decode(index, "element is not a blob"),
            });
        }
        self.offset += 2;
        self.skip_whitespace();
        if matches!(self.peek(), Some(b'"') | Some(b'\'')) {
            return Err(ProofError::decode(index, "element is a clob, not a blob"));
        }

        let start = self.offset;
        let len = self.text[start..]
            .windows(2)
            .position(|w| w == b"}}")
            .ok_or_else(|| ProofError::decode(index, "unterminated blob"))?;
        self.offset = start + len + 2;

        let encoded: Vec<u8> = self.text[start..start + len]
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        BASE64
            .decode(&encoded)
            .map_err(|e| ProofError::decode(index, format!("invalid base64: {e}")))
    }

    /// Consumes the separator after element `index`.
    ///
    /// Returns `true` if another element follows and `false` if the list was
    /// closed.
    pub fn next_separator(&mut self, index: usize) -> ProofResult<bool> {
        self.skip_trivia();
        match self.peek() {
            Some(b',') => {
                self.offset += 1;
                Ok(true)
            }
            Some(b']') => {
                self.offset += 1;
                Ok(false)
            }
            None => Err(ProofError::decode(index, "missing closing bracket")),
            Some(_) => Err(ProofError::decode(index, "expected ',' or ']' after element")),
        }
    }
}
