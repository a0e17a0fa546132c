use super::*;

#[test]
fn test_empty_argument_stays_empty() {
    for t in ArgType::ALL {
        assert_eq!(translate_argument(t, ""), "", "{t}");
    }
}

#[test]
fn test_variables_and_flags() {
    assert_eq!(translate_argument(ArgType::Variable, "v5"), "vars[5]");
    assert_eq!(translate_argument(ArgType::Variable, "V12"), "vars[12]");
    assert_eq!(translate_argument(ArgType::Flag, "f3"), "flags[3]");

    // not a numbered reference, left for the caller
    assert_eq!(translate_argument(ArgType::Variable, "7"), "7");
    assert_eq!(translate_argument(ArgType::Variable, "v"), "v");
    assert_eq!(translate_argument(ArgType::Variable, "vx1"), "vx1");
    assert_eq!(translate_argument(ArgType::Flag, "v3"), "v3");
}

#[test]
fn test_messages_and_objects() {
    assert_eq!(translate_argument(ArgType::Message, "\"hi\""), "\"hi\"");
    assert_eq!(translate_argument(ArgType::Message, "12"), "messages[12]");
    assert_eq!(translate_argument(ArgType::Message, "m4"), "messages[4]");
    assert_eq!(translate_argument(ArgType::InventoryObject, "i2"), "objects[2]");
    assert_eq!(translate_argument(ArgType::InventoryObject, "\"key\""), "\"key\"");
    assert_eq!(translate_argument(ArgType::InventoryObject, "9"), "objects[9]");
}

#[test]
fn test_passthrough_types() {
    assert_eq!(translate_argument(ArgType::Number, "42"), "42");
    assert_eq!(translate_argument(ArgType::Number, "v1"), "v1");
    assert_eq!(translate_argument(ArgType::Word, "o1"), "o1");
    assert_eq!(translate_argument(ArgType::Word, "\"look\""), "\"look\"");
}
