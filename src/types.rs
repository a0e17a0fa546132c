use super::*;
use serde::Deserialize;

/// Options controlling the shape of the generated Lua.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,

    /// Name of the local table returned by the generated chunk.
    pub container_name: String,

    /// Name of the entry function stored in the container.
    pub entry_name: String,

    /// Comment lines written at the top of the output. Each line is prefixed with `-- `.
    pub banner: Vec<String>
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            indent_width: 2,
            container_name: "logic".to_owned(),
            entry_name: "execute".to_owned(),
            banner: vec!["AGI logic compiled to Lua".to_owned(), "Generated by logilua".to_owned()]
        }
    }
}

impl CompileOptions {
    /// Read options from JSON. Missing fields take their default value.
    ///
    /// # Errors
    ///
    /// Errors if the data is not valid JSON or a field has the wrong type.
    pub fn from_json(data: &[u8]) -> Result<CompileOptions, serde_json::Error> {
        serde_json::from_slice(data)
    }
}

/// Result of compiling a logic script.
///
/// Compilation always produces a program. If anything went wrong, the program contains `-- ERROR` comments where
/// the problems were found and [`CompiledLogic::get_diagnostics`] lists them.
#[derive(Clone, Debug)]
pub struct CompiledLogic {
    pub(crate) lines: Vec<String>,
    pub(crate) diagnostics: Vec<CompileError>
}

impl CompiledLogic {
    /// Get all generated Lua lines, already indented.
    pub fn get_lines(&self) -> &[String] {
        &self.lines
    }

    /// Get all errors reported while compiling.
    pub fn get_diagnostics(&self) -> &[CompileError] {
        &self.diagnostics
    }

    /// Return true if no errors were reported.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get the status code: 0 if clean, 1 if any error was reported.
    pub fn status(&self) -> i32 {
        if self.is_clean() { 0 } else { 1 }
    }

    /// Join the lines into a Lua chunk.
    pub fn to_lua_source(&self) -> String {
        let mut source = String::new();
        for l in &self.lines {
            source += l;
            source.push('\n');
        }
        source
    }
}
