use serde::Deserialize;

/// Argument type, used to decide how a raw argument is written in Lua
#[derive(Copy, Clone, PartialEq, Eq, Debug, Deserialize)]
pub enum ArgType {
    #[serde(rename = "var", alias = "variable")]
    Variable,

    #[serde(rename = "flag")]
    Flag,

    #[serde(rename = "msg", alias = "message")]
    Message,

    #[serde(rename = "iobj", alias = "inventory_object")]
    InventoryObject,

    #[serde(rename = "num", alias = "number")]
    Number,

    #[serde(rename = "word")]
    Word
}

impl ArgType {
    pub const ALL: [ArgType; 6] = [
        ArgType::Variable,
        ArgType::Flag,
        ArgType::Message,
        ArgType::InventoryObject,
        ArgType::Number,
        ArgType::Word
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            ArgType::Variable => "variable",
            ArgType::Flag => "flag",
            ArgType::Message => "message",
            ArgType::InventoryObject => "inventory object",
            ArgType::Number => "number",
            ArgType::Word => "word"
        }
    }

    /// Get the Lua table this type indexes into, if any.
    pub fn table_name(&self) -> Option<&'static str> {
        match *self {
            ArgType::Variable => Some("vars"),
            ArgType::Flag => Some("flags"),
            ArgType::Message => Some("messages"),
            ArgType::InventoryObject => Some("objects"),
            ArgType::Number | ArgType::Word => None
        }
    }

    /// Get the sigil that prefixes a numbered reference of this type (`v5`, `f3`, ...).
    pub fn sigil(&self) -> Option<char> {
        match *self {
            ArgType::Variable => Some('v'),
            ArgType::Flag => Some('f'),
            ArgType::Message => Some('m'),
            ArgType::InventoryObject => Some('i'),
            ArgType::Number | ArgType::Word => None
        }
    }
}

impl std::fmt::Display for ArgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
