use super::*;
use super::scanner::{is_identifier_byte, Identifier};
use std::collections::BTreeSet;

const KEYWORDS: [&str; 4] = ["if", "else", "goto", "return"];

/// Lua labels are plain names, so dots are replaced.
fn lua_label(name: &str) -> String {
    name.replace('.', "_")
}

impl<'t> Translation<'t> {
    /// Compile every statement on the current line.
    ///
    /// A statement that fails is reported and the rest of its line is skipped, except for unterminated strings,
    /// where compiling resumes at the point the string reader stopped.
    pub(super) fn compile_line(&mut self) {
        let mut line_start = true;

        loop {
            self.skip_spaces();
            let c = match self.peek() {
                Some(n) => n,
                None => break
            };

            match c {
                b';' => self.column += 1,
                b'{' => self.column += 1,
                b'}' => {
                    self.column += 1;
                    self.close_brace();
                },
                b'/' if self.peek_at(1) == Some(b'/') => break,
                _ => {
                    let line = self.line;
                    if let Err(e) = self.compile_statement(line_start) {
                        let resume = e.get_error_type() == CompileErrorType::UnterminatedString;
                        self.report(e);

                        if !resume {
                            self.skip_rest_of_line();
                        }
                        else if self.line != line {
                            line_start = true;
                            continue;
                        }
                    }
                }
            }

            line_start = false;
        }
    }

    fn close_brace(&mut self) {
        self.flush_pending_close();
        if self.blocks.is_empty() {
            report_compile_error!(self, CompileErrorType::UnmatchedBlock, "'}' without matching if".to_owned());
        }
        else {
            self.pending_close = true;
        }
    }

    fn compile_statement(&mut self, line_start: bool) -> Result<(), CompileError> {
        let name = self.read_identifier();
        if name.lowercase.is_empty() {
            return_compile_error!(self, CompileErrorType::Syntax, format!("expected command, got {}", self.describe_here()))
        }

        if line_start && self.read_label_end(&name) {
            self.flush_pending_close();
            self.emitter.emit(&format!("::{}::", lua_label(name.text)));
            return Ok(())
        }

        if name.lowercase == "else" {
            return self.compile_else()
        }
        self.flush_pending_close();

        match name.lowercase {
            "if" => {
                // A bad condition still opens its block so the braces after it pair up
                let condition = match self.compile_condition() {
                    Ok(n) => n,
                    Err(e) => {
                        self.report(e);
                        self.skip_past_open_brace();
                        "false".to_owned()
                    }
                };
                self.emitter.emit(&format!("if {condition} then"));
                self.emitter.indent();
                self.blocks.push(Block { in_else: false });
            },
            "goto" => self.compile_goto()?,
            "return" => {
                self.skip_empty_arguments("return");
                self.emitter.emit("do return true end");
            },
            command_name => {
                let catalog = self.catalog;
                let command = match catalog.find_statement(command_name) {
                    Some(n) => n,
                    None => return_compile_error!(self, CompileErrorType::UnknownCommand, format!("unknown command '{command_name}'"))
                };

                let arguments = self.read_arguments(command)?;
                self.emitter.emit(&format!("{}({})", command.get_output(), arguments.join(", ")));
            }
        }

        Ok(())
    }

    /// Find the label of every goto in the input, so bare words alone on a line can be told apart from mistyped commands.
    pub(super) fn collect_goto_targets(&self) -> BTreeSet<String> {
        let mut targets = BTreeSet::new();

        for line in self.lines {
            let bytes = line.lowercase.as_bytes();
            let mut search = 0;

            while let Some(offset) = line.lowercase[search..].find("goto") {
                let start = search + offset;
                let mut i = start + 4;
                search = i;

                if (start > 0 && is_identifier_byte(bytes[start - 1])) || bytes.get(i).is_some_and(|c| is_identifier_byte(*c)) {
                    continue;
                }

                while matches!(bytes.get(i), Some(b' ') | Some(b'\t') | Some(b'(')) {
                    i += 1;
                }
                let length = bytes[i..].iter().take_while(|c| is_identifier_byte(**c)).count();
                if length > 0 {
                    targets.insert(self.resolve(&line.text[i..i + length]));
                }
            }
        }

        targets
    }

    /// Move the cursor past the next '{' on the line, or to the end of the line if there is none.
    fn skip_past_open_brace(&mut self) {
        match self.current_line().and_then(|l| l.lowercase.as_bytes().get(self.column..)).and_then(|rest| rest.iter().position(|c| *c == b'{')) {
            Some(n) => self.column += n + 1,
            None => self.skip_rest_of_line()
        }
    }

    /// Check whether the identifier just read is a label, consuming its ':' if so.
    ///
    /// A label is alone on its line. Without a ':' it must be the target of some goto.
    fn read_label_end(&mut self, name: &Identifier<'t>) -> bool {
        if KEYWORDS.contains(&name.lowercase) {
            return false
        }

        let column = self.column;
        self.skip_spaces();
        let colon = self.consume(b':');
        let label = self.rest_is_blank() && (colon || self.goto_targets.contains(name.text));

        if !label {
            self.column = column;
        }

        label
    }

    fn compile_else(&mut self) -> Result<(), CompileError> {
        let in_else = match self.blocks.last() {
            Some(n) => n.in_else,
            None => true
        };
        if in_else {
            return_compile_error!(self, CompileErrorType::UnmatchedBlock, "else without matching if".to_owned())
        }

        // the '}' before this else ends the if branch only
        self.pending_close = false;

        if let Some(block) = self.blocks.last_mut() {
            block.in_else = true;
        }
        self.emitter.dedent();
        self.emitter.emit("else");
        self.emitter.indent();

        Ok(())
    }

    fn compile_goto(&mut self) -> Result<(), CompileError> {
        self.skip_spaces();
        let parenthesised = self.consume(b'(');
        self.skip_spaces();

        let target = self.read_identifier();
        if target.text.is_empty() {
            return_compile_error!(self, CompileErrorType::Syntax, format!("expected label after 'goto', got {}", self.describe_here()))
        }
        let target = self.resolve(target.text);

        if parenthesised {
            self.skip_spaces();
            if !self.consume(b')') {
                report_compile_error!(self, CompileErrorType::Syntax, format!("expected ')' after goto label, got {}", self.describe_here()));
            }
        }

        self.emitter.emit(&format!("goto {}", lua_label(&target)));
        Ok(())
    }

    /// Consume an optional `()` after a command that takes no arguments.
    fn skip_empty_arguments(&mut self, name: &str) {
        self.skip_spaces();
        if !self.consume(b'(') {
            return;
        }

        self.skip_spaces();
        if self.consume(b')') {
            return;
        }

        report_compile_error!(self, CompileErrorType::Syntax, format!("'{name}' takes no arguments"));
        while let Some(c) = self.peek() {
            self.column += 1;
            if c == b')' {
                break;
            }
        }
    }
}
