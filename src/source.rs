use super::*;

/// One line of preprocessed logic source.
pub(crate) struct SourceLine {
    /// Original text, used for anything copied into the output
    pub text: String,

    /// ASCII lowercase copy of `text`, used for matching keywords and command names
    pub lowercase: String,

    /// Index into the compiler's file list
    pub file: usize,

    /// Line number in the original file, starting at 1
    pub line: usize
}

impl SourceLine {
    pub fn new(text: &str, file: usize, line: usize) -> SourceLine {
        SourceLine {
            text: text.to_owned(),
            lowercase: text.to_ascii_lowercase(),
            file: file,
            line: line
        }
    }
}

impl<'a> Compiler<'a> {
    fn file_index(&mut self, filename: &str) -> usize {
        match self.files.iter().position(|f| f == filename) {
            Some(n) => n,
            None => {
                self.files.push(filename.to_owned());
                self.files.len() - 1
            }
        }
    }

    pub(super) fn push_line(&mut self, filename: &str, line_number: usize, text: &str) {
        let file = self.file_index(filename);
        self.lines.push(SourceLine::new(text, file, line_number));
    }

    pub(super) fn split_script_data(&mut self, filename: &str, script: &[u8]) -> Result<(), CompileError> {
        let script = match std::str::from_utf8(script) {
            Ok(n) => n,
            Err(e) => {
                let valid = &script[..e.valid_up_to()];
                let line = valid.iter().filter(|c| **c == b'\n').count() + 1;
                let column = valid.iter().rev().take_while(|c| **c != b'\n').count();
                return Err(CompileError::from_message(filename, line, column, CompileErrorType::Syntax, format!("failed to decode script - {e}")))
            }
        };

        // Lines are added only once the whole file has decoded
        let file = self.file_index(filename);
        for (i, text) in script.lines().enumerate() {
            self.lines.push(SourceLine::new(text, file, i + 1));
        }

        Ok(())
    }
}
