use std::io::{self, Write};

/// Collects generated Lua lines, optionally writing each one to a sink as it is produced.
pub(super) struct Emitter<'s> {
    lines: Vec<String>,
    indent: usize,
    indent_width: usize,
    sink: Option<&'s mut dyn Write>,
    sink_error: Option<io::Error>
}

impl<'s> Emitter<'s> {
    pub fn new(indent_width: usize, sink: Option<&'s mut dyn Write>) -> Emitter<'s> {
        Emitter {
            lines: Vec::new(),
            indent: 0,
            indent_width: indent_width,
            sink: sink,
            sink_error: None
        }
    }

    /// Append a line at the current indentation. Blank lines are not indented.
    pub fn emit(&mut self, text: &str) {
        let line = if text.is_empty() {
            String::new()
        }
        else {
            format!("{:width$}{text}", "", width = self.indent * self.indent_width)
        };

        if let Some(sink) = self.sink.as_mut() {
            if let Err(e) = writeln!(sink, "{line}") {
                // Stop writing after the first failure; the run reports it at the end
                self.sink_error = Some(e);
                self.sink = None;
            }
        }

        self.lines.push(line);
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn get_indent(&self) -> usize {
        self.indent
    }

    pub fn finish(self) -> (Vec<String>, Option<io::Error>) {
        (self.lines, self.sink_error)
    }
}
