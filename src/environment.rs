//! The single global variable binding table (spec.md §4.4).

use std::collections::HashMap;

use crate::value::Value;

/// A mapping from identifier to `Value`. There are no nested function
/// scopes in MiniPyLang — `if`/`while` blocks share this one table.
#[derive(Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Returns `true` if a binding existed and was removed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.bindings.remove(name).is_some()
    }

    /// A snapshot of all current bindings, for the REPL's `vars` command.
    pub fn snapshot(&self) -> Vec<(&String, &Value)> {
        self.bindings.iter().collect()
    }

    pub fn reset(&mut self) {
        self.bindings.clear();
    }
}
