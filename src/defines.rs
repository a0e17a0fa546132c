use std::collections::{BTreeMap, HashMap};

/// Macro substitution applied to bare arguments and goto targets.
///
/// Lines given to the compiler are expected to be preprocessed already; this covers defines that only become
/// visible once an argument has been split out of its line.
pub trait DefineResolver {
    /// Get the replacement for `name`, or `None` if it is not defined.
    fn resolve(&self, name: &str) -> Option<&str>;
}

/// Resolver with no defines.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoDefines;

impl DefineResolver for NoDefines {
    fn resolve(&self, _name: &str) -> Option<&str> {
        None
    }
}

impl DefineResolver for BTreeMap<String, String> {
    fn resolve(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl DefineResolver for HashMap<String, String> {
    fn resolve(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Apply `resolver` to `text`, returning `text` itself if nothing is defined.
pub(crate) fn replace_define(resolver: &dyn DefineResolver, text: &str) -> String {
    resolver.resolve(text).unwrap_or(text).to_owned()
}
