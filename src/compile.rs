use super::*;
use super::defines::replace_define;

use std::collections::BTreeSet;
use std::io::{self, Write};

macro_rules! return_compile_error {
    ($translation: expr, $error_type: expr, $message: expr) => {
        return Err($translation.error_here($error_type, $message))
    };
}

macro_rules! report_compile_error {
    ($translation: expr, $error_type: expr, $message: expr) => {{
        let error = $translation.error_here($error_type, $message);
        $translation.report(error);
    }};
}

mod argument;
mod condition;
mod emit;
mod scanner;
mod statement;

pub use self::argument::translate_argument;
use self::emit::Emitter;

/// An if block that has not been closed yet.
struct Block {
    in_else: bool
}

/// State of a single compilation run.
pub(crate) struct Translation<'t> {
    lines: &'t [SourceLine],
    files: &'t [String],
    catalog: &'t Catalog,
    defines: &'t dyn DefineResolver,
    options: &'t CompileOptions,

    line: usize,
    column: usize,
    finished: bool,

    emitter: Emitter<'t>,
    blocks: Vec<Block>,

    /// A '}' was read; the innermost block closes unless an else follows.
    pending_close: bool,

    /// Every label named by a goto, after define replacement
    goto_targets: BTreeSet<String>,

    diagnostics: Vec<CompileError>
}

impl<'t> Translation<'t> {
    pub(crate) fn new<'a: 't>(compiler: &'t Compiler<'a>, sink: Option<&'t mut dyn Write>) -> Translation<'t> {
        let options = &compiler.options;
        Translation {
            lines: &compiler.lines,
            files: &compiler.files,
            catalog: compiler.catalog,
            defines: match compiler.defines.as_deref() {
                Some(n) => n,
                None => &NoDefines
            },
            options: options,

            line: 0,
            column: 0,
            finished: compiler.lines.is_empty(),

            emitter: Emitter::new(options.indent_width, sink),
            blocks: Vec::new(),
            pending_close: false,
            goto_targets: BTreeSet::new(),

            diagnostics: Vec::new()
        }
    }

    /// Compile every line and return the program along with the first error the sink gave, if any.
    pub(crate) fn run(mut self) -> (CompiledLogic, Option<io::Error>) {
        log::debug!("compiling {} line(s) from {} file(s)", self.lines.len(), self.files.len());

        self.goto_targets = self.collect_goto_targets();
        self.write_prologue();

        while !self.finished {
            self.compile_line();
            self.advance_line();
        }

        if !self.blocks.is_empty() {
            log::debug!("closing {} if block(s) left open at end of input", self.blocks.len());
        }
        self.close_all_blocks();

        self.write_epilogue();
        debug_assert_eq!(self.emitter.get_indent(), 0);

        let (lines, sink_error) = self.emitter.finish();
        log::debug!("generated {} lua line(s) with {} error(s)", lines.len(), self.diagnostics.len());

        (CompiledLogic { lines: lines, diagnostics: self.diagnostics }, sink_error)
    }

    fn write_prologue(&mut self) {
        let options = self.options;
        let container = options.container_name.as_str();

        for b in &options.banner {
            self.emitter.emit(&format!("-- {b}"));
        }
        if !options.banner.is_empty() {
            self.emitter.emit("");
        }

        self.emitter.emit(&format!("local {container} = {{}}"));
        self.emitter.emit("");
        self.emitter.emit(&format!("function {container}.{}(vars, flags, objects, messages)", options.entry_name));
        self.emitter.indent();
        for table in ["vars", "flags", "objects", "messages"] {
            self.emitter.emit(&format!("{table} = {table} or {{}}"));
        }
        self.emitter.emit("");
    }

    fn write_epilogue(&mut self) {
        self.emitter.emit("return true");
        self.emitter.dedent();
        self.emitter.emit("end");
        self.emitter.emit("");
        self.emitter.emit(&format!("return {}", self.options.container_name));
    }

    /// Close the innermost block.
    fn close_block(&mut self) {
        if self.blocks.pop().is_some() {
            self.emitter.dedent();
            self.emitter.emit("end");
        }
    }

    /// Close the block a previous '}' ended, if any.
    fn flush_pending_close(&mut self) {
        if self.pending_close {
            self.pending_close = false;
            self.close_block();
        }
    }

    fn close_all_blocks(&mut self) {
        self.pending_close = false;
        while !self.blocks.is_empty() {
            self.close_block();
        }
    }

    /// Make an error pointing at the cursor.
    fn error_here(&self, error_type: CompileErrorType, message: String) -> CompileError {
        let source = match self.lines.get(self.line) {
            Some(n) => Some(n),
            None => self.lines.last()
        };

        match source {
            Some(source) => {
                let file = match self.files.get(source.file) {
                    Some(n) => n.as_str(),
                    None => "unknown"
                };
                CompileError::from_message(file, source.line, self.column, error_type, message)
            },
            None => CompileError::from_message("unknown", 0, 0, error_type, message)
        }
    }

    /// Write the error into the program as a comment and remember it. Compilation carries on.
    fn report(&mut self, error: CompileError) {
        log::warn!("{error}");
        self.emitter.emit(&error.to_lua_comment());
        self.diagnostics.push(error);
    }

    fn resolve(&self, text: &str) -> String {
        replace_define(self.defines, text)
    }
}
