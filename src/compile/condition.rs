use super::*;

impl<'t> Translation<'t> {
    /// Compile the parenthesised condition of an if into a Lua expression.
    ///
    /// Parentheses are kept as written, `&&`/`||`/`!` become `and`/`or`/`not`, and each test command is written
    /// according to its [`TestForm`].
    pub(super) fn compile_condition(&mut self) -> Result<String, CompileError> {
        self.skip_condition_spaces()?;
        if self.peek() != Some(b'(') {
            return_compile_error!(self, CompileErrorType::Syntax, format!("expected '(' after 'if', got {}", self.describe_here()))
        }
        self.compile_condition_group()
    }

    /// Skip blanks, moving on to the next line if the condition continues there.
    fn skip_condition_spaces(&mut self) -> Result<(), CompileError> {
        loop {
            self.skip_spaces();
            if !self.at_end_of_line() {
                return Ok(())
            }

            self.advance_line();
            if self.finished {
                return_compile_error!(self, CompileErrorType::Syntax, "unterminated condition at end of input".to_owned())
            }
        }
    }

    fn compile_condition_group(&mut self) -> Result<String, CompileError> {
        debug_assert_eq!(self.peek(), Some(b'('));
        self.column += 1;

        let mut expression = String::from("(");
        let mut expect_term = true;

        loop {
            self.skip_condition_spaces()?;

            if self.consume(b')') {
                if expect_term {
                    return_compile_error!(self, CompileErrorType::Syntax, "expected test command before ')'".to_owned())
                }
                expression.push(')');
                return Ok(expression)
            }

            if expect_term {
                expression += &self.compile_condition_term()?;
                expect_term = false;
            }
            else if self.consume_str("&&") {
                expression += " and ";
                expect_term = true;
            }
            else if self.consume_str("||") {
                expression += " or ";
                expect_term = true;
            }
            else {
                return_compile_error!(self, CompileErrorType::Syntax, format!("expected '&&', '||' or ')' in condition, got {}", self.describe_here()))
            }
        }
    }

    fn compile_condition_term(&mut self) -> Result<String, CompileError> {
        let negate = self.consume(b'!');
        if negate {
            self.skip_condition_spaces()?;
        }

        let term = if self.peek() == Some(b'(') {
            self.compile_condition_group()?
        }
        else {
            let name = self.read_identifier();
            if name.lowercase.is_empty() {
                return_compile_error!(self, CompileErrorType::Syntax, format!("expected test command, got {}", self.describe_here()))
            }

            let catalog = self.catalog;
            let command = match catalog.find_test(name.lowercase) {
                Some(n) => n,
                None => return_compile_error!(self, CompileErrorType::UnknownTestCommand, format!("unknown test command '{}'", name.lowercase))
            };

            self.compile_test(command)?
        };

        if negate {
            Ok(format!("not ({term})"))
        }
        else {
            Ok(term)
        }
    }

    fn compile_test(&mut self, command: &CatalogCommand) -> Result<String, CompileError> {
        let name = command.get_name();
        let output = command.get_output();
        let form = command.get_form();

        if form == TestForm::Said {
            let words = self.read_said_arguments()?;
            return Ok(format!("{output}({})", words.join(", ")))
        }

        let arguments = self.read_arguments(command)?;
        let needed = match form {
            TestForm::Call => return Ok(format!("{output}({})", arguments.join(", "))),
            TestForm::Truth => 1,
            _ => 2
        };

        if command.get_parameters().len() != needed {
            return_compile_error!(self, CompileErrorType::Syntax, format!("test command '{name}' takes {} argument(s) and cannot be written as a {form:?} test", command.get_parameters().len()))
        }
        if arguments.len() != needed || arguments.iter().any(String::is_empty) {
            return_compile_error!(self, CompileErrorType::Syntax, format!("test command '{name}' takes {needed} argument(s), got {}", arguments.iter().filter(|a| !a.is_empty()).count()))
        }

        Ok(match form {
            TestForm::Equal => format!("{} == {}", arguments[0], arguments[1]),
            TestForm::Greater => format!("{} > {}", arguments[0], arguments[1]),
            TestForm::Less => format!("{} < {}", arguments[0], arguments[1]),
            _ => arguments[0].clone()
        })
    }
}
