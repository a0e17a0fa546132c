//! Compiler from AGI logic scripts to Lua.
//!
//! Lines are fed to a [`Compiler`] after includes and defines have been expanded, then compiled into a Lua chunk
//! returning a table with a single entry function. Errors do not stop compilation; they are written into the
//! generated program as comments and listed in the [`CompiledLogic`].

#[cfg(test)]
mod test;

mod definitions;

mod arg_type;
pub use arg_type::ArgType;

mod error;
pub use error::{CompileErrorType, CompileError};

mod catalog;
pub use catalog::{Catalog, CatalogCommand, TestForm};

mod defines;
pub use defines::{DefineResolver, NoDefines};

mod compile;
pub use compile::translate_argument;
use compile::Translation;

mod types;
pub use types::*;

mod source;
use source::SourceLine;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct Compiler<'a> {
    lines: Vec<SourceLine>,
    files: Vec<String>,

    catalog: &'a Catalog,
    defines: Option<Box<dyn DefineResolver + 'a>>,
    options: CompileOptions
}

impl<'a> Compiler<'a> {
    pub fn new(catalog: &'a Catalog) -> Compiler<'a> {
        Compiler::with_options(catalog, CompileOptions::default())
    }

    pub fn with_options(catalog: &'a Catalog, options: CompileOptions) -> Compiler<'a> {
        Compiler {
            lines: Vec::new(),
            files: Vec::new(),

            catalog: catalog,
            defines: None,
            options: options
        }
    }

    /// Set the defines applied to bare arguments and goto targets.
    pub fn set_defines<D: DefineResolver + 'a>(&mut self, defines: D) {
        self.defines = Some(Box::new(defines));
    }

    /// Get the options used for generating code.
    pub fn get_options(&self) -> &CompileOptions {
        &self.options
    }

    /// Add one preprocessed line, attributed to `line_number` (starting at 1) of `filename`.
    pub fn add_line(&mut self, filename: &str, line_number: usize, text: &str) {
        self.push_line(filename, line_number, text)
    }

    /// Add all lines of a file from a u8 slice containing UTF-8 data.
    ///
    /// # Errors
    ///
    /// Errors if the script contains non-UTF8. No lines are added in that case.
    pub fn read_script_data(&mut self, filename: &str, script: &[u8]) -> Result<(), CompileError> {
        self.split_script_data(filename, script)
    }

    /// Get the names of all files lines were added from.
    pub fn get_files(&self) -> &[String] {
        &self.files
    }

    /// Get the number of lines added.
    pub fn get_line_count(&self) -> usize {
        self.lines.len()
    }

    /// Remove all lines and files so the compiler can be used for another script.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.files.clear();
    }

    /// Compile all added lines.
    pub fn compile(&self) -> CompiledLogic {
        let (logic, sink_error) = Translation::new(self, None).run();
        debug_assert!(sink_error.is_none());
        logic
    }

    /// Compile all added lines, writing each generated line to `writer` as well.
    ///
    /// # Errors
    ///
    /// Errors if writing fails. Errors in the script itself are not returned here; see [`CompiledLogic::get_diagnostics`].
    pub fn compile_to_writer<W: Write>(&self, mut writer: W) -> Result<CompiledLogic, CompileError> {
        let (logic, sink_error) = Translation::new(self, Some(&mut writer as &mut dyn Write)).run();
        let result = match sink_error {
            Some(e) => Err(e),
            None => writer.flush()
        };
        match result {
            Ok(()) => Ok(logic),
            Err(e) => Err(CompileError::from_io("<output>", &e))
        }
    }

    /// Compile all added lines into a Lua file at `path`.
    ///
    /// # Errors
    ///
    /// Errors if the file cannot be created, in which case nothing is compiled, or if writing fails.
    pub fn compile_to_file<P: AsRef<Path>>(&self, path: P) -> Result<CompiledLogic, CompileError> {
        let path = path.as_ref();
        let path_str = path.to_string_lossy();

        let file = match File::create(path) {
            Ok(n) => n,
            Err(e) => return Err(CompileError::from_io(&path_str, &e))
        };

        log::debug!("writing lua to {path_str}");
        self.compile_to_writer(BufWriter::new(file)).map_err(|e| CompileError::from_message(&path_str, 0, 0, CompileErrorType::Io, e.get_message().to_owned()))
    }

    /// Compile all added lines into the Lua file for logic resource `number` of the game in `game_dir`.
    ///
    /// The file is `<game_dir>/lua/logic<number>.lua`; the `lua` directory is created if needed.
    ///
    /// # Errors
    ///
    /// Errors if the directory or file cannot be created or written.
    pub fn compile_to_resource<P: AsRef<Path>>(&self, game_dir: P, number: u8) -> Result<CompiledLogic, CompileError> {
        let path = resource_path(game_dir.as_ref(), number);
        if let Some(directory) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(directory) {
                return Err(CompileError::from_io(&directory.to_string_lossy(), &e))
            }
        }
        self.compile_to_file(path)
    }
}

/// Get the path of the Lua file for logic resource `number` of the game in `game_dir`.
pub fn resource_path(game_dir: &Path, number: u8) -> PathBuf {
    game_dir.join("lua").join(format!("logic{number}.lua"))
}
