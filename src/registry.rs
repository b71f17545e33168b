//! The parser registry: an ordered collection of resolvers.
//!
//! Registration order is priority order. `resolve` walks the rules in that
//! order and commits to the first whose `matches` succeeds: that rule's
//! `resolve` result, success or error, is the registry's result. Because
//! several rules implement `matches` by attempting a full resolve, every
//! probe is itself a parse attempt; the caches inside the chained rules are
//! what keep this affordable.

use core::cell::Cell;

use crate::ast::Expr;
use crate::error::ParseError;
use crate::resolver::Resolver;
use crate::token::{Token, TokenSeq};

/// Upper bound on nested resolution calls, counting both `resolve` and the
/// `matches` probes that recurse through it. Deeply nested inputs fail with
/// [`ParseError::RecursionLimit`] instead of blowing the stack.
pub const MAX_RESOLVE_DEPTH: usize = 256;

/// Upper bound on total resolution calls within one top-level parse. Only
/// successful resolutions are memoized, so an input that fails everywhere
/// can retry partitions combinatorially; the step budget cuts that search
/// off. Generous for any realistic input.
pub const MAX_RESOLVE_STEPS: usize = 1_000_000;

/// Ordered resolver registry producing expression trees.
///
/// A parser is built once (see [`crate::engine::expression_parser`]), used
/// for any number of inputs within one session, and dropped together with
/// its caches. It is not meant to be shared across threads.
pub struct Parser {
    rules: Vec<Box<dyn Resolver<Output = Expr>>>,
    depth: Cell<usize>,
    steps: Cell<usize>,
}

impl Parser {
    /// A registry with no rules. Grammar construction adds them in priority
    /// order.
    pub fn empty() -> Self {
        Parser {
            rules: Vec::new(),
            depth: Cell::new(0),
            steps: Cell::new(0),
        }
    }

    /// Enter one resolution level, charging the depth and step budgets.
    /// Returns false when either budget is exhausted.
    fn enter(&self) -> bool {
        if self.depth.get() == 0 {
            self.steps.set(0);
        }
        let steps = self.steps.get() + 1;
        self.steps.set(steps);
        let depth = self.depth.get() + 1;
        if depth > MAX_RESOLVE_DEPTH || steps > MAX_RESOLVE_STEPS {
            return false;
        }
        self.depth.set(depth);
        true
    }

    fn leave(&self) {
        self.depth.set(self.depth.get() - 1);
    }

    /// Append a rule. Earlier rules are tried first.
    pub fn add(&mut self, rule: Box<dyn Resolver<Output = Expr>>) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Resolve a full token vector into an expression tree.
    pub fn parse(&self, tokens: Vec<Token>) -> Result<Expr, ParseError> {
        self.resolve(&TokenSeq::new(tokens))
    }

    /// Whether any registered rule accepts `seq`.
    ///
    /// A probe past the depth or step budget answers false: backtracking
    /// recurses through here as much as through `resolve`, so the budgets
    /// must hold on this path too.
    pub fn matches(&self, seq: &TokenSeq) -> bool {
        if seq.is_empty() {
            return false;
        }
        if !self.enter() {
            return false;
        }
        let result = self.rules.iter().any(|rule| rule.matches(self, seq));
        self.leave();
        result
    }

    /// Try each rule in registration order; the first match decides.
    pub fn resolve(&self, seq: &TokenSeq) -> Result<Expr, ParseError> {
        if seq.is_empty() {
            return Err(ParseError::EmptySequence);
        }
        if !self.enter() {
            return Err(ParseError::RecursionLimit);
        }
        let result = self.resolve_inner(seq);
        self.leave();
        result
    }

    fn resolve_inner(&self, seq: &TokenSeq) -> Result<Expr, ParseError> {
        for rule in &self.rules {
            if rule.matches(self, seq) {
                return rule.resolve(self, seq);
            }
        }
        Err(ParseError::NoRuleMatched {
            sequence: seq.to_string(),
        })
    }
}
