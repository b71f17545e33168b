//! The chained resolver: backtracking partition search over an ordered list
//! of consumers.
//!
//! A chain owns consumers, each a resolver responsible for one contiguous
//! slice of the input. Resolution searches for a partition of the sequence
//! across the consumers: for the consumer at position `c` and remaining
//! input `S`, non-empty prefixes of `S` are tried in increasing length. The
//! first length at which consumer `c` itself fails aborts the whole chain;
//! longer prefixes are not tried. When consumer `c` accepts a prefix and the
//! next consumer accepts the remainder (or the remainder is a single final
//! token), the prefix is committed, its resolved value stored, and the
//! search recurses on the remainder. The last consumer must take all that is
//! left.
//!
//! Committed values land in per-consumer caches plus an ordered storage; a
//! user-supplied combiner turns the storage into the chain's result, which
//! is memoized in the chain's own cache. The implicit-multiplication,
//! function-application, and unary-negation grammar rules are all instances
//! of this engine.

use crate::ast::{BinaryOp, Expr, MathFunction};
use crate::cache::ResolverCache;
use crate::error::ParseError;
use crate::registry::Parser;
use crate::resolver::Resolver;
use crate::token::TokenSeq;

/// A value committed by one consumer during partition search.
///
/// Consumers in one chain may resolve to different things (an operator tag,
/// a function tag, a finished sub-expression, or the raw matched tokens), so
/// storage holds this closed set of possibilities.
#[derive(Clone, Debug)]
pub enum Fragment {
    /// A resolved sub-expression.
    Expr(Expr),
    /// The matched tokens themselves, for combiners that rewrite and
    /// re-resolve.
    Tokens(TokenSeq),
    /// An operator tag from a single OPERATOR token.
    Operator(BinaryOp),
    /// A function tag from a single FUNCTION token.
    Function(MathFunction),
}

/// Combination function producing the chain's result from the committed
/// consumer values, in consumer order.
pub type Combiner = fn(&Parser, &[Fragment]) -> Result<Expr, ParseError>;

/// One consumer: a resolver plus its own success cache.
pub struct Consumer {
    resolver: Box<dyn Resolver<Output = Fragment>>,
    cache: ResolverCache<Fragment>,
}

impl Consumer {
    pub fn new(resolver: Box<dyn Resolver<Output = Fragment>>) -> Self {
        Consumer {
            resolver,
            cache: ResolverCache::new(),
        }
    }

    fn matches(&self, parser: &Parser, seq: &TokenSeq) -> bool {
        if self.cache.contains(seq) {
            return true;
        }
        self.resolver.matches(parser, seq)
    }

    fn resolve(&self, parser: &Parser, seq: &TokenSeq) -> Result<Fragment, ParseError> {
        if let Some(hit) = self.cache.get(seq) {
            return Ok(hit);
        }
        let value = self.resolver.resolve(parser, seq)?;
        Ok(self.cache.put(seq.clone(), value))
    }
}

/// Backtracking resolver over an ordered consumer chain.
pub struct ChainResolver {
    id: &'static str,
    consumers: Vec<Consumer>,
    combine: Combiner,
    cache: ResolverCache<Expr>,
}

impl ChainResolver {
    pub fn new(id: &'static str, consumers: Vec<Consumer>, combine: Combiner) -> Self {
        ChainResolver {
            id,
            consumers,
            combine,
            cache: ResolverCache::new(),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    fn fail(&self) -> ParseError {
        ParseError::NoPartition { rule: self.id }
    }

    fn resolve_consumer(
        &self,
        parser: &Parser,
        c: usize,
        seq: &TokenSeq,
        storage: &mut Vec<Fragment>,
    ) -> Result<(), ParseError> {
        let consumer = &self.consumers[c];

        if c == self.consumers.len() - 1 {
            if consumer.matches(parser, seq) {
                storage.push(consumer.resolve(parser, seq)?);
                return Ok(());
            }
            return Err(self.fail());
        }

        let next = &self.consumers[c + 1];
        for i in 1..seq.len() {
            let prefix = seq.slice(0..i);
            if !consumer.matches(parser, &prefix) {
                // A refused prefix is final for this chain; longer prefixes
                // are not attempted.
                return Err(self.fail());
            }
            let rest = seq.slice(i..seq.len());
            if i == seq.len() - 1 || next.matches(parser, &rest) {
                storage.push(consumer.resolve(parser, &prefix)?);
                return self.resolve_consumer(parser, c + 1, &rest, storage);
            }
        }

        Err(self.fail())
    }
}

impl Resolver for ChainResolver {
    type Output = Expr;

    fn resolve(&self, parser: &Parser, seq: &TokenSeq) -> Result<Expr, ParseError> {
        if self.consumers.is_empty() {
            return Err(self.fail());
        }
        if let Some(hit) = self.cache.get(seq) {
            return Ok(hit);
        }

        let mut storage = Vec::with_capacity(self.consumers.len());
        self.resolve_consumer(parser, 0, seq, &mut storage)?;
        let result = (self.combine)(parser, &storage)?;
        Ok(self.cache.put(seq.clone(), result))
    }
}

/// Consumer resolver accepting any sequence the registry can resolve,
/// yielding the sequence itself rather than the expression.
///
/// Used where the combiner wants to splice the matched tokens into a
/// synthetic sequence and re-resolve.
pub struct MatchedTokens;

impl Resolver for MatchedTokens {
    type Output = Fragment;

    fn resolve(&self, parser: &Parser, seq: &TokenSeq) -> Result<Fragment, ParseError> {
        if parser.matches(seq) {
            Ok(Fragment::Tokens(seq.clone()))
        } else {
            Err(ParseError::NoRuleMatched {
                sequence: seq.to_string(),
            })
        }
    }

    fn matches(&self, parser: &Parser, seq: &TokenSeq) -> bool {
        parser.matches(seq)
    }
}

/// Consumer resolver delegating to the registry and yielding the resolved
/// expression.
pub struct RegistryOperand;

impl Resolver for RegistryOperand {
    type Output = Fragment;

    fn resolve(&self, parser: &Parser, seq: &TokenSeq) -> Result<Fragment, ParseError> {
        parser.resolve(seq).map(Fragment::Expr)
    }

    fn matches(&self, parser: &Parser, seq: &TokenSeq) -> bool {
        parser.matches(seq)
    }
}
