use logilua_definitions::generate_definitions;
use super::{ArgType, TestForm};

/// Command as described by the bundled definition file.
pub(crate) struct EngineCommand {
    pub name: &'static str,
    pub output: &'static str,
    pub parameters: &'static [ArgType],
    pub form: TestForm
}

generate_definitions!();
