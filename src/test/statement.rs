use super::*;

#[test]
fn test_string_continued_on_next_line() {
    let logic = compile_lines(&["print(\"Hello, ", "      \"world!\");", "stop.sound();"]);
    assert_eq!(body(&logic), ["print(\"Hello, world!\")", "stop_sound()"]);
    assert!(logic.is_clean());

    // compiling carries on from the line the string closed on
    let logic = compile_lines(&["print(\"Hello, ", "      \"world!\"); frobnicate();", "stop.sound();"]);
    assert_eq!(body(&logic), ["print(\"Hello, world!\")", "-- ERROR [test.lgc:2] unknown command 'frobnicate'", "stop_sound()"]);
    assert_eq!(logic.get_diagnostics()[0].get_position().0, 2);
}

#[test]
fn test_string_keeps_case_and_escapes() {
    let logic = compile_lines(&["print(\"Say \\\"Hi\\\", Roger\");"]);
    assert_eq!(body(&logic), ["print(\"Say \\\"Hi\\\", Roger\")"]);
}

#[test]
fn test_unterminated_string() {
    let logic = compile_lines(&["print(\"Hello", "stop.sound();"]);

    assert_eq!(body(&logic), ["-- ERROR [test.lgc:2] unterminated string, expected '\"' to continue it but got 's'", "stop_sound()"]);
    assert_eq!(logic.get_diagnostics()[0].get_error_type(), CompileErrorType::UnterminatedString);

    let logic = compile_lines(&["print(\"Hello"]);
    assert_eq!(logic.get_diagnostics()[0].get_error_type(), CompileErrorType::UnterminatedString);
    assert_eq!(logic.get_diagnostics()[0].get_position().0, 1);
}

#[test]
fn test_missing_separator_continues() {
    let logic = compile_lines(&["print.at(\"hi\" 1, 2, 3);", "set.view(o1);"]);

    assert_eq!(body(&logic), [
        "-- ERROR [test.lgc:1] expected ',' between arguments of 'print.at', got '1'",
        "print_at(\"hi\", 1, 2, 3)",
        "-- ERROR [test.lgc:2] expected ',' between arguments of 'set.view', got ')'",
        "set_view(o1)"
    ]);
    assert!(logic.get_diagnostics().iter().all(|d| d.get_error_type() == CompileErrorType::MissingSeparator));
}

#[test]
fn test_argument_list_errors() {
    let logic = compile_lines(&["print(m1, m2);", "print m1;", "stop.sound;", "print(m3"]);
    let body = body(&logic);

    assert_eq!(body[0], "-- ERROR [test.lgc:1] too many arguments for 'print'");
    assert_eq!(body[1], "print(messages[1])");
    assert!(body[2].starts_with("-- ERROR [test.lgc:2] expected '(' after 'print'"));
    assert_eq!(body[3], "stop_sound()");
    assert_eq!(body[4], "-- ERROR [test.lgc:4] expected ')' after arguments of 'print'");
    assert_eq!(body[5], "print(messages[3])");
}

#[test]
fn test_if_blocks_are_balanced() {
    let logic = compile_lines(&["if (isset(f1)) {", "if (isset(f2)) {", "print(m1);"]);
    let body = body(&logic);

    let headers = body.iter().filter(|l| l.trim_start().starts_with("if ")).count();
    let ends = body.iter().filter(|l| l.trim() == "end").count();
    assert_eq!(headers, 2);
    assert_eq!(ends, headers);
    assert_eq!(body, ["if (flags[1]) then", "  if (flags[2]) then", "    print(messages[1])", "  end", "end"]);
}

#[test]
fn test_braces_on_one_line() {
    let logic = compile_lines(&["if (isset(f1)) { print(m1); } else { print(m2); }", "print(m3);"]);
    assert_eq!(body(&logic), ["if (flags[1]) then", "  print(messages[1])", "else", "  print(messages[2])", "end", "print(messages[3])"]);
    assert!(logic.is_clean());
}

#[test]
fn test_else_without_braces() {
    let logic = compile_lines(&["if (isset(f1))", "print(m1);", "else", "print(m2);"]);
    assert_eq!(body(&logic), ["if (flags[1]) then", "  print(messages[1])", "else", "  print(messages[2])", "end"]);
}

#[test]
fn test_unmatched_blocks() {
    let logic = compile_lines(&["else {", "}", "if (isset(f1)) {", "} else {", "} else {", "}"]);

    let types: Vec<CompileErrorType> = logic.get_diagnostics().iter().map(|d| d.get_error_type()).collect();
    assert_eq!(types.len(), 4);
    assert!(types.iter().all(|t| *t == CompileErrorType::UnmatchedBlock));

    assert_eq!(body(&logic), [
        "-- ERROR [test.lgc:1] else without matching if",
        "-- ERROR [test.lgc:2] '}' without matching if",
        "if (flags[1]) then",
        "else",
        "  -- ERROR [test.lgc:5] else without matching if",
        "end",
        "-- ERROR [test.lgc:6] '}' without matching if"
    ]);
}

#[test]
fn test_labels_and_goto() {
    let logic = compile_lines(&["Loop1:", "goto(Loop1);", "goto Loop1;", "  room.exit :", "goto(room.exit);", "Finish", "goto(Finish);"]);
    assert_eq!(body(&logic), ["::Loop1::", "goto Loop1", "goto Loop1", "::room_exit::", "goto room_exit", "::Finish::", "goto Finish"]);
    assert!(logic.is_clean());
}

#[test]
fn test_bare_word_needs_goto_to_be_a_label() {
    let logic = compile_lines(&["frobnicate", "print(m1);", "Finish", "nogoto Finish2;"]);
    assert_eq!(body(&logic), [
        "-- ERROR [test.lgc:1] unknown command 'frobnicate'",
        "print(messages[1])",
        "-- ERROR [test.lgc:3] unknown command 'finish'",
        "-- ERROR [test.lgc:4] unknown command 'nogoto'"
    ]);
    assert_eq!(logic.status(), 1);
    assert!(logic.get_diagnostics().iter().all(|d| d.get_error_type() == CompileErrorType::UnknownCommand));
}

#[test]
fn test_keywords_and_commands_are_not_labels() {
    let logic = compile_lines(&["stop.sound", "return", "goto;"]);
    let body = body(&logic);

    assert_eq!(body[0], "stop_sound()");
    assert_eq!(body[1], "do return true end");
    assert!(body[2].starts_with("-- ERROR [test.lgc:3] expected label after 'goto'"));
}

#[test]
fn test_return() {
    let logic = compile_lines(&["return();", "return;", "return(1);"]);
    assert_eq!(body(&logic), [
        "do return true end",
        "do return true end",
        "-- ERROR [test.lgc:3] 'return' takes no arguments",
        "do return true end"
    ]);
}

#[test]
fn test_comments_and_blank_lines() {
    let logic = compile_lines(&["", "   ", "// nothing here", "print(m1); // says hi"]);
    assert_eq!(body(&logic), ["print(messages[1])"]);
    assert!(logic.is_clean());
}

#[test]
fn test_unexpected_character() {
    let logic = compile_lines(&["= 5;", "v30 = 5;", "print(m1);"]);
    let types: Vec<CompileErrorType> = logic.get_diagnostics().iter().map(|d| d.get_error_type()).collect();

    assert_eq!(types, [CompileErrorType::Syntax, CompileErrorType::UnknownCommand]);
    assert_eq!(body(&logic).last().unwrap(), "print(messages[1])");
}
