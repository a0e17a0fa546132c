use super::*;
use super::definitions::{ALL_STATEMENT_COMMANDS, ALL_TEST_COMMANDS, EngineCommand};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// How a test command is written inside a Lua condition.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestForm {
    /// Call `output(args...)` and use the result.
    #[default]
    Call,

    /// Variadic word list, written as `said(words...)`.
    Said,

    /// The first argument is the condition itself.
    Truth,

    /// `arg0 == arg1`
    Equal,

    /// `arg0 > arg1`
    Greater,

    /// `arg0 < arg1`
    Less
}

/// A statement or test command the compiler knows about.
#[derive(Clone, Debug)]
pub struct CatalogCommand {
    name: String,
    output: String,
    parameters: Vec<ArgType>,
    form: TestForm
}

impl CatalogCommand {
    /// Create a command that is written to Lua under its own name (dots become underscores).
    pub fn new(name: &str, parameters: &[ArgType]) -> CatalogCommand {
        let name = name.to_ascii_lowercase();
        CatalogCommand {
            output: name.replace('.', "_"),
            name: name,
            parameters: parameters.to_vec(),
            form: TestForm::Call
        }
    }

    /// Set the name of the Lua function called for this command.
    pub fn with_output(mut self, output: &str) -> CatalogCommand {
        self.output = output.to_owned();
        self
    }

    /// Set how this command is written when used as a test.
    pub fn with_form(mut self, form: TestForm) -> CatalogCommand {
        self.form = form;
        self
    }

    /// Get the (lowercase) name used in logic scripts.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Get the name written to Lua.
    pub fn get_output(&self) -> &str {
        &self.output
    }

    /// Get the argument types, in order.
    pub fn get_parameters(&self) -> &[ArgType] {
        &self.parameters
    }

    /// Get the test form. Always [`TestForm::Call`] for statement commands built from definitions.
    pub fn get_form(&self) -> TestForm {
        self.form
    }
}

fn from_engine_command(command: &EngineCommand) -> CatalogCommand {
    CatalogCommand {
        name: command.name.to_owned(),
        output: command.output.to_owned(),
        parameters: command.parameters.to_vec(),
        form: command.form
    }
}

#[derive(Deserialize)]
struct CatalogFileCommand {
    name: String,

    #[serde(default)]
    output: Option<String>,

    #[serde(default)]
    parameters: Vec<ArgType>,

    #[serde(default)]
    form: TestForm
}

impl From<CatalogFileCommand> for CatalogCommand {
    fn from(command: CatalogFileCommand) -> CatalogCommand {
        let mut c = CatalogCommand::new(&command.name, &command.parameters).with_form(command.form);
        if let Some(output) = command.output {
            c.output = output;
        }
        c
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    commands: Vec<CatalogFileCommand>,

    #[serde(default)]
    tests: Vec<CatalogFileCommand>
}

/// Statement and test command tables. Read-only once built.
#[derive(Clone, Debug)]
pub struct Catalog {
    statements: Vec<CatalogCommand>,
    tests: Vec<CatalogCommand>,
    statements_by_name: BTreeMap<String, usize>,
    tests_by_name: BTreeMap<String, usize>
}

impl Catalog {
    /// Build a catalog. If a name appears more than once, the first entry is used.
    pub fn new(statements: Vec<CatalogCommand>, tests: Vec<CatalogCommand>) -> Catalog {
        fn index(commands: &[CatalogCommand]) -> BTreeMap<String, usize> {
            let mut by_name = BTreeMap::new();
            for (i, c) in commands.iter().enumerate() {
                by_name.entry(c.name.clone()).or_insert(i);
            }
            by_name
        }

        Catalog {
            statements_by_name: index(&statements),
            tests_by_name: index(&tests),
            statements: statements,
            tests: tests
        }
    }

    /// Get the catalog of the standard AGI commands.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Catalog::new(
                ALL_STATEMENT_COMMANDS.iter().map(from_engine_command).collect(),
                ALL_TEST_COMMANDS.iter().map(from_engine_command).collect()
            )
        })
    }

    /// Read a catalog from JSON with a `commands` and a `tests` array.
    ///
    /// # Errors
    ///
    /// Errors if the data is not valid JSON or an entry has an unknown argument type or form.
    pub fn from_json(data: &[u8]) -> Result<Catalog, serde_json::Error> {
        let file : CatalogFile = serde_json::from_slice(data)?;
        Ok(Catalog::new(
            file.commands.into_iter().map(CatalogCommand::from).collect(),
            file.tests.into_iter().map(CatalogCommand::from).collect()
        ))
    }

    /// Look up a statement command by name, ignoring case.
    pub fn find_statement(&self, name: &str) -> Option<&CatalogCommand> {
        self.statements_by_name.get(name.to_ascii_lowercase().as_str()).map(|&i| &self.statements[i])
    }

    /// Look up a test command by name, ignoring case.
    pub fn find_test(&self, name: &str) -> Option<&CatalogCommand> {
        self.tests_by_name.get(name.to_ascii_lowercase().as_str()).map(|&i| &self.tests[i])
    }

    /// Get all statement commands.
    pub fn get_statements(&self) -> &[CatalogCommand] {
        &self.statements
    }

    /// Get all test commands.
    pub fn get_tests(&self) -> &[CatalogCommand] {
        &self.tests
    }
}
