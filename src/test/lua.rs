use super::*;

use mlua::{Function, Lua, Table};

/// Load a compiled logic into Lua, run it with the given flags and variables set, and return what it printed.
fn run_logic(logic: &CompiledLogic, flags: &[u32], vars: &[(u32, i64)]) -> Vec<String> {
    let lua = Lua::new();
    lua.load("printed = {} function print(s) printed[#printed + 1] = tostring(s) end").exec().unwrap();

    let container : Table = lua.load(logic.to_lua_source()).set_name("logic").eval().unwrap();
    let execute : Function = container.get("execute").unwrap();

    let flag_table = lua.create_table().unwrap();
    for f in flags {
        flag_table.set(*f, true).unwrap();
    }
    let var_table = lua.create_table().unwrap();
    for (v, n) in vars {
        var_table.set(*v, *n).unwrap();
    }

    let finished : bool = execute.call((var_table, flag_table)).unwrap();
    assert!(finished);

    let printed : Table = lua.globals().get("printed").unwrap();
    printed.sequence_values::<String>().map(|v| v.unwrap()).collect()
}

#[test]
fn test_generated_lua_runs() {
    let logic = compile_script("control_flow.lgc", include_bytes!("script/control_flow.lgc"));
    assert!(logic.is_clean(), "{:?}", logic.get_diagnostics());

    assert_eq!(run_logic(&logic, &[5], &[(1, 3)]), ["yes", "three", "done"]);
    assert_eq!(run_logic(&logic, &[5, 6], &[(1, 3)]), ["yes", "done"]);
    assert_eq!(run_logic(&logic, &[], &[]), ["no", "done"]);
}

#[test]
fn test_hello_world_runs() {
    let logic = compile_script("hello_world.lgc", include_bytes!("script/hello_world.lgc"));
    assert_eq!(run_logic(&logic, &[5], &[]), ["Hello, world!"]);
    assert_eq!(run_logic(&logic, &[], &[]), ["nil"]);
}

#[test]
fn test_output_with_errors_still_loads() {
    let logic = compile_lines(&["if (isset(f1)) {", "frobnicate(v1);", "print(\"in\");", "else", "print(\"out\");"]);
    assert_eq!(logic.status(), 1);
    assert_eq!(run_logic(&logic, &[1], &[]), ["in"]);
    assert_eq!(run_logic(&logic, &[], &[]), ["out"]);
}
