use super::*;

use std::collections::BTreeMap;

mod lua;
mod statement;
mod translate;

/// Lines before the body with default options: banner (2), blank, container, blank, function, 4 defaults, blank.
const PROLOGUE_LINES: usize = 11;

/// `return true`, `end`, blank, `return logic`
const EPILOGUE_LINES: usize = 4;

fn compile_lines(lines: &[&str]) -> CompiledLogic {
    compile_lines_with(Catalog::builtin(), lines)
}

fn compile_lines_with(catalog: &Catalog, lines: &[&str]) -> CompiledLogic {
    let mut compiler = Compiler::new(catalog);
    for (i, l) in lines.iter().enumerate() {
        compiler.add_line("test.lgc", i + 1, l);
    }
    compiler.compile()
}

fn compile_script(filename: &str, script: &[u8]) -> CompiledLogic {
    let mut compiler = Compiler::new(Catalog::builtin());
    compiler.read_script_data(filename, script).unwrap();
    compiler.compile()
}

/// Get the generated statements with the envelope and its indentation removed.
fn body(logic: &CompiledLogic) -> Vec<String> {
    let lines = logic.get_lines();
    lines[PROLOGUE_LINES..lines.len() - EPILOGUE_LINES].iter()
        .map(|l| l.strip_prefix("  ").unwrap_or(l).to_owned())
        .collect()
}

#[test]
fn test_hello_world() {
    let logic = compile_script("hello_world.lgc", include_bytes!("script/hello_world.lgc"));

    let expected = [
        "-- AGI logic compiled to Lua",
        "-- Generated by logilua",
        "",
        "local logic = {}",
        "",
        "function logic.execute(vars, flags, objects, messages)",
        "  vars = vars or {}",
        "  flags = flags or {}",
        "  objects = objects or {}",
        "  messages = messages or {}",
        "",
        "  if (flags[5]) then",
        "    print(\"Hello, world!\")",
        "  else",
        "    print(messages[2])",
        "  end",
        "  do return true end",
        "  return true",
        "end",
        "",
        "return logic"
    ];

    assert_eq!(logic.get_lines(), expected);
    assert!(logic.is_clean());
    assert_eq!(logic.status(), 0);
}

#[test]
fn test_empty_input() {
    let logic = compile_lines(&[]);
    assert!(body(&logic).is_empty());
    assert!(logic.is_clean());
    assert_eq!(logic.get_lines().last().unwrap(), "return logic");
}

#[test]
fn test_deterministic() {
    let script = include_bytes!("script/control_flow.lgc");
    let first = compile_script("control_flow.lgc", script);
    let second = compile_script("control_flow.lgc", script);
    assert_eq!(first.to_lua_source(), second.to_lua_source());
}

#[test]
fn test_crlf_script() {
    let logic = compile_script("crlf.lgc", include_bytes!("script/crlf.lgc"));
    assert_eq!(body(&logic), ["if (flags[1]) then", "  print(\"crlf\")", "end"]);
}

#[test]
fn test_read_script_data_rejects_invalid_utf8() {
    let mut compiler = Compiler::new(Catalog::builtin());
    let error = compiler.read_script_data("bad.lgc", b"print(m1);\nprint(\"\xff\");\n").unwrap_err();

    assert_eq!(error.get_file(), "bad.lgc");
    assert_eq!(error.get_position().0, 2);
    assert_eq!(compiler.get_line_count(), 0);
}

#[test]
fn test_unknown_command_is_reported_inline() {
    let mut compiler = Compiler::new(Catalog::builtin());
    compiler.add_line("room1.lgc", 10, "print(m1);");
    compiler.add_line("defs.lgc", 3, "frobnicate(v1);");
    compiler.add_line("room1.lgc", 12, "print(m2);");

    let logic = compiler.compile();
    assert_eq!(body(&logic), ["print(messages[1])", "-- ERROR [defs.lgc:3] unknown command 'frobnicate'", "print(messages[2])"]);

    assert_eq!(logic.status(), 1);
    let diagnostics = logic.get_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].get_error_type(), CompileErrorType::UnknownCommand);
    assert_eq!(diagnostics[0].get_file(), "defs.lgc");
    assert_eq!(diagnostics[0].get_position().0, 3);
    assert_eq!(compiler.get_files(), ["room1.lgc", "defs.lgc"]);
}

#[test]
fn test_defines() {
    let mut defines = BTreeMap::new();
    defines.insert("ego".to_owned(), "o0".to_owned());
    defines.insert("msg_hello".to_owned(), "m3".to_owned());
    defines.insert("START".to_owned(), "Start".to_owned());

    let mut compiler = Compiler::new(Catalog::builtin());
    compiler.set_defines(defines);
    compiler.add_line("test.lgc", 1, "animate.obj(ego);");
    compiler.add_line("test.lgc", 2, "print(msg_hello);");
    compiler.add_line("test.lgc", 3, "goto(START);");

    let logic = compiler.compile();
    assert_eq!(body(&logic), ["animate_obj(o0)", "print(messages[3])", "goto Start"]);
}
