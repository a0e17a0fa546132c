use super::*;

/// Get the number of a sigil reference like `v5` (sigil is case insensitive).
fn numbered_reference(arg_type: ArgType, raw: &str) -> Option<&str> {
    let sigil = arg_type.sigil()?;
    let first = raw.chars().next()?;
    if !first.eq_ignore_ascii_case(&sigil) {
        return None
    }

    let number = &raw[1..];
    if !number.is_empty() && number.bytes().all(|c| c.is_ascii_digit()) {
        Some(number)
    }
    else {
        None
    }
}

/// Translate a raw argument into Lua for the given argument type.
///
/// Variables and flags written as `v<n>`/`f<n>` index the `vars`/`flags` tables; anything else is left alone.
/// Messages and inventory objects index `messages`/`objects` unless they are quoted literals. Numbers and words are
/// never changed, and an empty argument stays empty.
pub fn translate_argument(arg_type: ArgType, raw: &str) -> String {
    if raw.is_empty() {
        return String::new()
    }

    let table = match arg_type.table_name() {
        Some(n) => n,
        None => return raw.to_owned()
    };

    match arg_type {
        ArgType::Variable | ArgType::Flag => match numbered_reference(arg_type, raw) {
            Some(number) => format!("{table}[{number}]"),
            None => raw.to_owned()
        },
        _ => {
            if raw.starts_with('"') {
                raw.to_owned()
            }
            else {
                match numbered_reference(arg_type, raw) {
                    Some(number) => format!("{table}[{number}]"),
                    None => format!("{table}[{raw}]")
                }
            }
        }
    }
}

impl<'t> Translation<'t> {
    /// Read the parenthesised arguments of `command` and translate them.
    ///
    /// Missing separators and a bad closing parenthesis are reported but do not stop the command from being
    /// written. Fewer arguments than expected may be returned if the list ends early.
    pub(super) fn read_arguments(&mut self, command: &CatalogCommand) -> Result<Vec<String>, CompileError> {
        let name = command.get_name();
        let parameters = command.get_parameters();

        self.skip_spaces();
        if !self.consume(b'(') {
            if parameters.is_empty() {
                return Ok(Vec::new())
            }
            return_compile_error!(self, CompileErrorType::Syntax, format!("expected '(' after '{name}', got {}", self.describe_here()))
        }

        let mut arguments = Vec::with_capacity(parameters.len());
        for (i, arg_type) in parameters.iter().enumerate() {
            let raw = self.read_argument()?;
            arguments.push(translate_argument(*arg_type, &raw));

            if i + 1 == parameters.len() {
                break;
            }

            self.skip_spaces();
            if !self.consume(b',') {
                report_compile_error!(self, CompileErrorType::MissingSeparator, format!("expected ',' between arguments of '{name}', got {}", self.describe_here()));

                // Nothing more to read
                if matches!(self.peek(), None | Some(b')')) {
                    break;
                }
            }
        }

        self.finish_argument_list(name);
        Ok(arguments)
    }

    /// Read the variable-length word list of a `said` test, leaving quoted words as they are.
    pub(super) fn read_said_arguments(&mut self) -> Result<Vec<String>, CompileError> {
        let mut words = Vec::new();

        self.skip_spaces();
        if !self.consume(b'(') {
            return Ok(words)
        }

        loop {
            self.skip_spaces();
            if self.consume(b')') {
                break;
            }
            if self.at_end_of_line() {
                report_compile_error!(self, CompileErrorType::Syntax, "expected ')' after said words".to_owned());
                break;
            }

            let word = self.read_argument()?;
            if !word.is_empty() {
                words.push(word);
            }

            self.skip_spaces();
            if self.consume(b',') {
                continue;
            }
            if self.consume(b')') {
                break;
            }

            report_compile_error!(self, CompileErrorType::MissingSeparator, format!("expected ',' between said words, got {}", self.describe_here()));
            if self.at_end_of_line() {
                break;
            }
        }

        Ok(words)
    }

    /// Consume the ')' ending an argument list, reporting anything left over before it.
    fn finish_argument_list(&mut self, name: &str) {
        self.skip_spaces();
        if self.consume(b')') {
            return;
        }

        if self.at_end_of_line() {
            report_compile_error!(self, CompileErrorType::Syntax, format!("expected ')' after arguments of '{name}'"));
            return;
        }

        report_compile_error!(self, CompileErrorType::Syntax, format!("too many arguments for '{name}'"));
        while let Some(c) = self.peek() {
            self.column += 1;
            if c == b')' {
                break;
            }
        }
    }
}
