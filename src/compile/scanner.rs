use super::*;

/// Identifier read from the current line.
pub(super) struct Identifier<'t> {
    /// Lowercase form, for matching keywords and commands
    pub lowercase: &'t str,

    /// Original text, for anything written to the output
    pub text: &'t str
}

pub(super) fn is_identifier_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'.'
}

/// Find the closing quote of a string whose content starts at `start`. A backslash escapes the next character.
fn find_closing_quote(text: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    while i < text.len() {
        match text[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1
        }
    }
    None
}

impl<'t> Translation<'t> {
    pub(super) fn current_line(&self) -> Option<&'t SourceLine> {
        if self.finished {
            None
        }
        else {
            self.lines.get(self.line)
        }
    }

    fn current_bytes(&self) -> &'t [u8] {
        match self.current_line() {
            Some(n) => n.lowercase.as_bytes(),
            None => &[]
        }
    }

    /// Move to the start of the next line, or finish if there is none.
    pub(super) fn advance_line(&mut self) {
        if self.finished {
            return;
        }

        self.line += 1;
        self.column = 0;
        if self.line >= self.lines.len() {
            self.finished = true;
        }
    }

    /// Get the (lowercase) character at the cursor.
    pub(super) fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    pub(super) fn peek_at(&self, offset: usize) -> Option<u8> {
        self.current_bytes().get(self.column + offset).copied()
    }

    pub(super) fn at_end_of_line(&self) -> bool {
        self.peek().is_none()
    }

    /// Consume `c` if it is at the cursor.
    pub(super) fn consume(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.column += 1;
            true
        }
        else {
            false
        }
    }

    /// Consume `s` if the line continues with it.
    pub(super) fn consume_str(&mut self, s: &str) -> bool {
        if self.current_bytes()[self.column.min(self.current_bytes().len())..].starts_with(s.as_bytes()) {
            self.column += s.len();
            true
        }
        else {
            false
        }
    }

    pub(super) fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(b' ') | Some(b'\t')) {
            self.column += 1;
        }
    }

    pub(super) fn skip_rest_of_line(&mut self) {
        self.column = self.current_bytes().len();
    }

    /// Return true if only blanks or a `//` comment remain on the line.
    pub(super) fn rest_is_blank(&self) -> bool {
        let bytes = self.current_bytes();
        let rest = &bytes[self.column.min(bytes.len())..];
        match rest.iter().position(|c| *c != b' ' && *c != b'\t') {
            Some(n) => rest[n..].starts_with(b"//"),
            None => true
        }
    }

    /// Get the original character at the cursor, for messages.
    pub(super) fn describe_here(&self) -> String {
        match self.current_line() {
            Some(line) => match line.text.get(self.column..).and_then(|s| s.chars().next()) {
                Some(c) => format!("'{c}'"),
                None => "end of line".to_owned()
            },
            None => "end of input".to_owned()
        }
    }

    /// Read letters, digits, '_' and '.' from the cursor. The result may be empty.
    pub(super) fn read_identifier(&mut self) -> Identifier<'t> {
        let line = match self.current_line() {
            Some(n) => n,
            None => return Identifier { lowercase: "", text: "" }
        };

        let bytes = line.lowercase.as_bytes();
        let start = self.column.min(bytes.len());
        let length = bytes[start..].iter().take_while(|c| is_identifier_byte(**c)).count();
        self.column = start + length;

        Identifier {
            lowercase: &line.lowercase[start..start + length],
            text: &line.text[start..start + length]
        }
    }

    /// Read one argument, quoted or bare, leaving the cursor after it.
    ///
    /// Bare arguments end at ',' or ')' and go through define replacement. Quoted arguments keep their quotes and
    /// may continue on following lines as long as each continuation starts with a quote.
    pub(super) fn read_argument(&mut self) -> Result<String, CompileError> {
        self.skip_spaces();
        match self.peek() {
            None => Ok(String::new()),
            Some(b'"') => self.read_quoted_argument(),
            Some(_) => Ok(self.read_bare_argument())
        }
    }

    fn read_bare_argument(&mut self) -> String {
        let line = match self.current_line() {
            Some(n) => n,
            None => return String::new()
        };

        let bytes = line.lowercase.as_bytes();
        let start = self.column;
        let end = match bytes[start..].iter().position(|c| *c == b',' || *c == b')') {
            Some(n) => start + n,
            None => bytes.len()
        };
        self.column = end;

        self.resolve(line.text[start..end].trim_end())
    }

    fn read_quoted_argument(&mut self) -> Result<String, CompileError> {
        let mut content = String::new();

        loop {
            let line = match self.current_line() {
                Some(n) => n,
                None => return_compile_error!(self, CompileErrorType::UnterminatedString, "unterminated string at end of input".to_owned())
            };

            // the cursor is on the opening quote
            let start = self.column + 1;
            let text = line.text.as_str();

            if let Some(end) = find_closing_quote(text.as_bytes(), start) {
                content += &text[start..end];
                self.column = end + 1;
                return Ok(format!("\"{content}\""));
            }

            content += text.get(start..).unwrap_or("");
            self.advance_line();
            if self.finished {
                return_compile_error!(self, CompileErrorType::UnterminatedString, "unterminated string at end of input".to_owned())
            }

            self.skip_spaces();
            if self.peek() != Some(b'"') {
                return_compile_error!(self, CompileErrorType::UnterminatedString, format!("unterminated string, expected '\"' to continue it but got {}", self.describe_here()))
            }
        }
    }
}
