extern crate proc_macro;
use proc_macro::TokenStream;

extern crate serde;
extern crate serde_json;
use serde::Deserialize;

fn default_value<T: Default>() -> T {
    T::default()
}

#[derive(Deserialize)]
struct Command {
    name: String,

    #[serde(default = "default_value")]
    output: Option<String>,

    #[serde(default = "default_value")]
    parameters: Vec<String>,

    #[serde(default = "default_value")]
    form: Option<String>
}

#[allow(dead_code)]
#[derive(Deserialize)]
struct DefinitionStruct {
    description: String,
    date: String,
    commands: Vec<Command>,
    tests: Vec<Command>
}

#[proc_macro]
pub fn generate_definitions(_: TokenStream) -> TokenStream {
    let json = include_bytes!("definition/definition.json");
    let json_slice = &json[..];
    let definitions : DefinitionStruct = serde_json::from_slice(json_slice).unwrap();

    fn argument_type(t: &str) -> &'static str {
        match t {
            "var" => "ArgType::Variable",
            "flag" => "ArgType::Flag",
            "msg" => "ArgType::Message",
            "iobj" => "ArgType::InventoryObject",
            "num" => "ArgType::Number",
            "word" => "ArgType::Word",
            n => panic!("unknown argument type '{n}'")
        }
    }

    fn test_form(t: Option<&str>) -> &'static str {
        match t {
            None | Some("call") => "TestForm::Call",
            Some("said") => "TestForm::Said",
            Some("truth") => "TestForm::Truth",
            Some("equal") => "TestForm::Equal",
            Some("greater") => "TestForm::Greater",
            Some("less") => "TestForm::Less",
            Some(n) => panic!("unknown test form '{n}'")
        }
    }

    // Lua identifiers can't contain dots, so load.view becomes load_view
    fn generate_command(c: &Command) -> String {
        let name = c.name.to_ascii_lowercase();
        let output = match c.output.as_ref() {
            Some(n) => n.to_owned(),
            None => name.replace('.', "_")
        };
        let form = test_form(c.form.as_deref());

        let mut parameters = String::new();
        for p in &c.parameters {
            parameters += argument_type(p);
            parameters += ",";
        }

        format!("EngineCommand {{ name: \"{name}\", output: \"{output}\", parameters: &[{parameters}], form: {form} }},")
    }

    let mut commands_list = String::new();
    for c in &definitions.commands {
        assert!(c.form.is_none(), "statement command '{}' cannot have a test form", c.name);
        commands_list += &generate_command(c);
    }

    let mut tests_list = String::new();
    for t in &definitions.tests {
        tests_list += &generate_command(t);
    }

    format!("pub(crate) const ALL_STATEMENT_COMMANDS: [EngineCommand; {}] = [{}]; pub(crate) const ALL_TEST_COMMANDS: [EngineCommand; {}] = [{}];", definitions.commands.len(), commands_list, definitions.tests.len(), tests_list).parse().unwrap()
}
