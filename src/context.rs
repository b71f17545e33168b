//! Variable bindings for expression evaluation.
//!
//! The core only ever asks two questions of a context: does a name exist, and
//! what value does it map to. That capability is the [`VariableLookup`]
//! trait; [`EvalContext`] is the stock implementation callers populate before
//! evaluating.

use std::collections::HashMap;

use crate::Real;

/// Name-to-value lookup used for variables during evaluation.
///
/// The core reads through this trait only; it never mutates a context.
pub trait VariableLookup {
    fn get_variable(&self, name: &str) -> Option<Real>;

    fn has_variable(&self, name: &str) -> bool {
        self.get_variable(name).is_some()
    }
}

/// Evaluation context holding variable bindings.
///
/// # Examples
///
/// ```
/// use seqexpr::{interp, EvalContext};
///
/// let mut ctx = EvalContext::new();
/// ctx.set_variable("x", 5.0);
/// assert_eq!(interp("2x + 1", Some(&ctx)).unwrap(), 11.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EvalContext {
    variables: HashMap<String, Real>,
}

impl EvalContext {
    pub fn new() -> Self {
        EvalContext::default()
    }

    /// Bind `name` to `value`, replacing any previous binding.
    pub fn set_variable(&mut self, name: impl Into<String>, value: Real) -> &mut Self {
        self.variables.insert(name.into(), value);
        self
    }

    pub fn variables(&self) -> &HashMap<String, Real> {
        &self.variables
    }
}

impl VariableLookup for EvalContext {
    fn get_variable(&self, name: &str) -> Option<Real> {
        self.variables.get(name).copied()
    }
}

impl VariableLookup for HashMap<String, Real> {
    fn get_variable(&self, name: &str) -> Option<Real> {
        self.get(name).copied()
    }
}
