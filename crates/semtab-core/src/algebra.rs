//! Derived parameters.
//!
//! The [`AlgebraBlock`] holds parameters declared with `!name` and
//! definitions written as `name := expression`. Expressions are opaque text
//! evaluated by the downstream engine.

use std::fmt;

use indexmap::IndexMap;

/// A derived parameter definition (`name := expression`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    name: String,
    expression: String,
}

impl Definition {
    /// Create a new definition.
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
        }
    }

    /// Get the defined parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the defining expression, verbatim.
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} := {}", self.name, self.expression)
    }
}

/// New parameters and definitions of a model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlgebraBlock {
    /// Declared parameter name to free flag, in declaration order.
    new_parameters: IndexMap<String, bool>,
    definitions: Vec<Definition>,
}

impl AlgebraBlock {
    /// Create an empty algebra block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new free parameter. Declaring a name twice keeps the first
    /// declaration.
    pub fn declare(&mut self, name: impl Into<String>) {
        self.new_parameters.entry(name.into()).or_insert(true);
    }

    /// Append a definition and mark a declared parameter of the same name as
    /// computed.
    pub fn define(&mut self, definition: Definition) {
        if let Some(free) = self.new_parameters.get_mut(definition.name()) {
            *free = false;
        }
        self.definitions.push(definition);
    }

    /// Declared parameters with their free flags, in declaration order.
    pub fn new_parameters(&self) -> impl Iterator<Item = (&str, bool)> {
        self.new_parameters
            .iter()
            .map(|(name, free)| (name.as_str(), *free))
    }

    /// Returns the free flag of a declared parameter.
    pub fn is_free(&self, name: &str) -> Option<bool> {
        self.new_parameters.get(name).copied()
    }

    /// Definitions in source order.
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    /// Returns `true` if nothing was declared or defined.
    pub fn is_empty(&self) -> bool {
        self.new_parameters.is_empty() && self.definitions.is_empty()
    }
}

impl fmt::Display for AlgebraBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in self.new_parameters.keys() {
            writeln!(f, "!{name}")?;
        }
        for definition in &self.definitions {
            writeln!(f, "{definition}")?;
        }
        Ok(())
    }
}
