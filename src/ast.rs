//! The expression tree and its evaluation.
//!
//! Resolution produces an [`Expr`]: a strict owned tree with no sharing and
//! no back-references, immutable once built. Each node can evaluate itself
//! against a variable context, render itself back to text, and expose its
//! children for generic traversal.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::context::VariableLookup;
use crate::error::EvalError;
use crate::functions;
use crate::Real;

/// Binary operator tag: symbol, precedence rank, and evaluation rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    /// The operator tag for a symbol, if the symbol is known.
    pub fn from_symbol(symbol: &str) -> Option<BinaryOp> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Subtract),
            "*" => Some(BinaryOp::Multiply),
            "/" => Some(BinaryOp::Divide),
            "^" => Some(BinaryOp::Power),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Power => "^",
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Subtract => 1,
            BinaryOp::Multiply | BinaryOp::Divide => 2,
            BinaryOp::Power => 3,
        }
    }

    /// Whether this operator binds strictly tighter than `other`.
    pub fn has_priority(&self, other: BinaryOp) -> bool {
        self.precedence() > other.precedence()
    }

    /// Apply the operator's binary evaluation rule.
    pub fn apply(&self, a: Real, b: Real) -> Result<Real, EvalError> {
        match self {
            BinaryOp::Add => Ok(a + b),
            BinaryOp::Subtract => Ok(a - b),
            BinaryOp::Multiply => Ok(a * b),
            BinaryOp::Divide => {
                if b == 0.0 {
                    Err(EvalError::DivideByZero)
                } else {
                    Ok(a / b)
                }
            }
            BinaryOp::Power => Ok(functions::pow(a, b)),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Builtin unary function tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MathFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log,
    Sqrt,
    Abs,
    Floor,
    Ceil,
}

impl MathFunction {
    /// The function tag for a name, if the name is in the builtin table.
    pub fn from_name(name: &str) -> Option<MathFunction> {
        match name {
            "sin" => Some(MathFunction::Sin),
            "cos" => Some(MathFunction::Cos),
            "tan" => Some(MathFunction::Tan),
            "asin" => Some(MathFunction::Asin),
            "acos" => Some(MathFunction::Acos),
            "atan" => Some(MathFunction::Atan),
            "sinh" => Some(MathFunction::Sinh),
            "cosh" => Some(MathFunction::Cosh),
            "tanh" => Some(MathFunction::Tanh),
            "exp" => Some(MathFunction::Exp),
            "ln" => Some(MathFunction::Ln),
            "log" => Some(MathFunction::Log),
            "sqrt" => Some(MathFunction::Sqrt),
            "abs" => Some(MathFunction::Abs),
            "floor" => Some(MathFunction::Floor),
            "ceil" => Some(MathFunction::Ceil),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MathFunction::Sin => "sin",
            MathFunction::Cos => "cos",
            MathFunction::Tan => "tan",
            MathFunction::Asin => "asin",
            MathFunction::Acos => "acos",
            MathFunction::Atan => "atan",
            MathFunction::Sinh => "sinh",
            MathFunction::Cosh => "cosh",
            MathFunction::Tanh => "tanh",
            MathFunction::Exp => "exp",
            MathFunction::Ln => "ln",
            MathFunction::Log => "log",
            MathFunction::Sqrt => "sqrt",
            MathFunction::Abs => "abs",
            MathFunction::Floor => "floor",
            MathFunction::Ceil => "ceil",
        }
    }

    /// Apply the function, rejecting arguments outside its domain.
    pub fn apply(&self, x: Real) -> Result<Real, EvalError> {
        let domain_err = |name| EvalError::FunctionDomain { name, argument: x };
        match self {
            MathFunction::Sin => Ok(functions::sin(x)),
            MathFunction::Cos => Ok(functions::cos(x)),
            MathFunction::Tan => Ok(functions::tan(x)),
            MathFunction::Asin => {
                if !(-1.0..=1.0).contains(&x) {
                    Err(domain_err("asin"))
                } else {
                    Ok(functions::asin(x))
                }
            }
            MathFunction::Acos => {
                if !(-1.0..=1.0).contains(&x) {
                    Err(domain_err("acos"))
                } else {
                    Ok(functions::acos(x))
                }
            }
            MathFunction::Atan => Ok(functions::atan(x)),
            MathFunction::Sinh => Ok(functions::sinh(x)),
            MathFunction::Cosh => Ok(functions::cosh(x)),
            MathFunction::Tanh => Ok(functions::tanh(x)),
            MathFunction::Exp => Ok(functions::exp(x)),
            MathFunction::Ln => {
                if x <= 0.0 {
                    Err(domain_err("ln"))
                } else {
                    Ok(functions::ln(x))
                }
            }
            MathFunction::Log => {
                if x <= 0.0 {
                    Err(domain_err("log"))
                } else {
                    Ok(functions::log(x))
                }
            }
            MathFunction::Sqrt => {
                if x < 0.0 {
                    Err(domain_err("sqrt"))
                } else {
                    Ok(functions::sqrt(x))
                }
            }
            MathFunction::Abs => Ok(functions::abs(x)),
            MathFunction::Floor => Ok(functions::floor(x)),
            MathFunction::Ceil => Ok(functions::ceil(x)),
        }
    }
}

impl fmt::Display for MathFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A node in the expression tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A literal numeric value.
    Number(Real),

    /// A named variable reference, resolved against the context at
    /// evaluation time.
    Variable(String),

    /// A binary operation over exactly two owned children.
    Operation {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// A builtin function applied to exactly one owned child.
    FunctionCall { func: MathFunction, arg: Box<Expr> },
}

impl Expr {
    /// Evaluate the tree against `vars`.
    ///
    /// Children evaluate left before right; the first failure aborts the
    /// whole evaluation.
    pub fn evaluate(&self, vars: &dyn VariableLookup) -> Result<Real, EvalError> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Variable(name) => {
                vars.get_variable(name)
                    .ok_or_else(|| EvalError::UnknownVariable { name: name.clone() })
            }
            Expr::Operation { op, left, right } => {
                let a = left.evaluate(vars)?;
                let b = right.evaluate(vars)?;
                op.apply(a, b)
            }
            Expr::FunctionCall { func, arg } => func.apply(arg.evaluate(vars)?),
        }
    }

    /// Render the tree back to text.
    ///
    /// A child of an operation is parenthesized only when it is itself an
    /// operation whose operator does not bind tighter than the parent's,
    /// which keeps precedence intact across a re-parse.
    pub fn render(&self) -> String {
        match self {
            Expr::Number(value) => format!("{}", value),
            Expr::Variable(name) => name.clone(),
            Expr::Operation { op, left, right } => {
                format!(
                    "{}{}{}",
                    self.render_operand(left),
                    op.symbol(),
                    self.render_operand(right)
                )
            }
            Expr::FunctionCall { func, arg } => format!("{}{}", func.name(), arg.render()),
        }
    }

    fn render_operand(&self, child: &Expr) -> String {
        if let (Expr::Operation { op: parent, .. }, Expr::Operation { op: inner, .. }) =
            (self, child)
        {
            if !inner.has_priority(*parent) {
                return format!("({})", child.render());
            }
        }
        child.render()
    }

    /// The direct children of this node: none for leaves, one for a function
    /// call, two for an operation.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Number(_) | Expr::Variable(_) => Vec::new(),
            Expr::Operation { left, right, .. } => vec![left, right],
            Expr::FunctionCall { arg, .. } => vec![arg],
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;
    use crate::context::EvalContext;

    fn op(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Operation {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn test_operator_priority_is_strict() {
        assert!(BinaryOp::Multiply.has_priority(BinaryOp::Add));
        assert!(!BinaryOp::Add.has_priority(BinaryOp::Multiply));
        assert!(!BinaryOp::Subtract.has_priority(BinaryOp::Add));
        assert!(BinaryOp::Power.has_priority(BinaryOp::Divide));
    }

    #[test]
    fn test_evaluate_operations() {
        let ctx = EvalContext::new();
        let tree = op(
            BinaryOp::Add,
            Expr::Number(2.0),
            op(BinaryOp::Multiply, Expr::Number(3.0), Expr::Number(4.0)),
        );
        assert_approx_eq!(tree.evaluate(&ctx).unwrap(), 14.0);
    }

    #[test]
    fn test_evaluate_variable_lookup() {
        let mut ctx = EvalContext::new();
        ctx.set_variable("x", 5.0);
        assert_eq!(Expr::Variable("x".into()).evaluate(&ctx), Ok(5.0));
        assert_eq!(
            Expr::Variable("y".into()).evaluate(&ctx),
            Err(EvalError::UnknownVariable { name: "y".into() })
        );
    }

    #[test]
    fn test_evaluate_divide_by_zero() {
        let ctx = EvalContext::new();
        let tree = op(BinaryOp::Divide, Expr::Number(1.0), Expr::Number(0.0));
        assert_eq!(tree.evaluate(&ctx), Err(EvalError::DivideByZero));
    }

    #[test]
    fn test_function_domain_errors() {
        assert!(matches!(
            MathFunction::Sqrt.apply(-1.0),
            Err(EvalError::FunctionDomain { name: "sqrt", .. })
        ));
        assert!(matches!(
            MathFunction::Ln.apply(0.0),
            Err(EvalError::FunctionDomain { name: "ln", .. })
        ));
        assert!(matches!(
            MathFunction::Asin.apply(1.5),
            Err(EvalError::FunctionDomain { name: "asin", .. })
        ));
        assert_approx_eq!(MathFunction::Sqrt.apply(9.0).unwrap(), 3.0);
    }

    #[test]
    fn test_render_parenthesizes_by_priority() {
        // 2+3*4 needs no parentheses.
        let tree = op(
            BinaryOp::Add,
            Expr::Number(2.0),
            op(BinaryOp::Multiply, Expr::Number(3.0), Expr::Number(4.0)),
        );
        assert_eq!(tree.render(), "2+3*4");

        // (2+3)*4 keeps the parentheses around the weaker child.
        let tree = op(
            BinaryOp::Multiply,
            op(BinaryOp::Add, Expr::Number(2.0), Expr::Number(3.0)),
            Expr::Number(4.0),
        );
        assert_eq!(tree.render(), "(2+3)*4");

        // Same precedence parenthesizes too, preserving grouping.
        let tree = op(
            BinaryOp::Subtract,
            Expr::Variable("a".into()),
            op(
                BinaryOp::Subtract,
                Expr::Variable("b".into()),
                Expr::Variable("c".into()),
            ),
        );
        assert_eq!(tree.render(), "a-(b-c)");
    }

    #[test]
    fn test_render_function_call() {
        let tree = Expr::FunctionCall {
            func: MathFunction::Sqrt,
            arg: Box::new(Expr::Number(9.0)),
        };
        assert_eq!(tree.render(), "sqrt9");
    }

    #[test]
    fn test_children_arity() {
        let leaf = Expr::Number(1.0);
        assert!(leaf.children().is_empty());

        let call = Expr::FunctionCall {
            func: MathFunction::Sin,
            arg: Box::new(Expr::Variable("x".into())),
        };
        assert_eq!(call.children().len(), 1);

        let operation = op(BinaryOp::Add, Expr::Number(1.0), Expr::Number(2.0));
        assert_eq!(operation.children().len(), 2);
    }
}
