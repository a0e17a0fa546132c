use std::fmt;

/// Error type for CompileError
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
pub enum CompileErrorType {
    /// The statement command is not in the catalog
    UnknownCommand,

    /// The test command in a condition is not in the catalog
    UnknownTestCommand,

    /// Expected ',' between arguments
    MissingSeparator,

    /// A quoted argument was never closed
    UnterminatedString,

    /// The line could not be parsed
    Syntax,

    /// An else or '}' has no if to belong to
    UnmatchedBlock,

    /// The output could not be written
    Io
}

impl CompileErrorType {
    pub fn as_str(&self) -> &'static str {
        match *self {
            CompileErrorType::UnknownCommand => "unknown command",
            CompileErrorType::UnknownTestCommand => "unknown test command",
            CompileErrorType::MissingSeparator => "missing separator",
            CompileErrorType::UnterminatedString => "unterminated string",
            CompileErrorType::Syntax => "syntax error",
            CompileErrorType::UnmatchedBlock => "unmatched block",
            CompileErrorType::Io => "i/o error"
        }
    }
}

impl fmt::Display for CompileErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct CompileError {
    message: String,
    file: String,
    error_type: CompileErrorType,
    line: usize,
    column: usize
}

impl CompileError {
    /// Create a `CompileError` from the given parameters.
    pub(crate) fn from_message(file: &str, line: usize, column: usize, error_type: CompileErrorType, message: String) -> CompileError {
        CompileError { line: line, column: column, error_type: error_type, file: file.to_owned(), message: message }
    }

    /// Create an I/O `CompileError` for the given path.
    pub(crate) fn from_io(path: &str, error: &std::io::Error) -> CompileError {
        CompileError::from_message(path, 0, 0, CompileErrorType::Io, format!("cannot write lua output - {error}"))
    }

    /// Get the message of the error.
    pub fn get_message(&self) -> &str {
        &self.message
    }

    /// Get the filename.
    pub fn get_file(&self) -> &str {
        &self.file
    }

    /// Get the error type.
    pub fn get_error_type(&self) -> CompileErrorType {
        self.error_type
    }

    /// Return the line and column of the error, starting at 1 and 0 respectively.
    pub fn get_position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Format the error as the Lua comment written into the generated program.
    pub fn to_lua_comment(&self) -> String {
        format!("-- ERROR [{}:{}] {}", self.file, self.line, self.message)
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}: {}: {}", self.file, self.line, self.column, self.error_type, self.message)
    }
}

impl std::error::Error for CompileError {}
