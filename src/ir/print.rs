//! Canonical rendering of IR nodes back to query syntax.
//!
//! Printing is total and deterministic: every well-formed node renders,
//! the same tree always renders the same text, and the output is valid
//! surface syntax. The output format is part of this crate's contract —
//! validators quote it in diagnostics and tests compare against it — so
//! the rules here must not drift.
//!
//! Casing rules: variable names print as stored; unquoted property names
//! were upper-cased at construction and print bare; quoted property names
//! print verbatim inside double quotes; temporal attribute and time-unit
//! tokens always print upper-case.

use std::fmt;

use crate::ir::expression::{
    Constant, ElemTimeAccess, Period, PeriodLengthExpression, PropTimeAccess, PropertyAccess,
    QueryExpression,
};
use crate::ir::variable::ExpAsVar;

/// Renders an expression to canonical query text.
pub fn print_expression(exp: &QueryExpression) -> String {
    exp.to_string()
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Integer(text) | Constant::Decimal(text) => f.write_str(text),
            Constant::String(text) => write_string_literal(f, text),
            Constant::Boolean(value) => write!(f, "{value}"),
            Constant::Date(text) => write!(f, "DATE '{text}'"),
            Constant::Timestamp(text) => write!(f, "TIMESTAMP '{text}'"),
        }
    }
}

// Single-quoted, with embedded quotes doubled.
fn write_string_literal(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("'")?;
    for ch in text.chars() {
        if ch == '\'' {
            f.write_str("''")?;
        } else {
            write!(f, "{ch}")?;
        }
    }
    f.write_str("'")
}

impl fmt::Display for PropertyAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_quoted() {
            write!(f, "{}.\"{}\"", self.variable().name(), self.property_name())
        } else {
            write!(f, "{}.{}", self.variable().name(), self.property_name())
        }
    }
}

impl fmt::Display for ElemTimeAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.variable().name(), self.time_property())
    }
}

impl fmt::Display for PropTimeAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.property_access(), self.time_property())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PERIOD({}, {})",
            self.beginning_bound(),
            self.ending_bound()
        )
    }
}

impl fmt::Display for PeriodLengthExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The unit is always rendered, defaulted or not.
        write!(f, "LENGTH({}, {})", self.time_unit(), self.exp())
    }
}

impl fmt::Display for QueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryExpression::Constant(constant) => write!(f, "{constant}"),
            QueryExpression::PropertyAccess(access) => write!(f, "{access}"),
            QueryExpression::ElemTimeAccess(access) => write!(f, "{access}"),
            QueryExpression::PropTimeAccess(access) => write!(f, "{access}"),
            QueryExpression::Period(period) => write!(f, "{period}"),
            QueryExpression::PeriodLength(length) => write!(f, "{length}"),
            QueryExpression::Comparison(op, exp1, exp2) => {
                write!(f, "{exp1} {} {exp2}", op.token())
            }
            QueryExpression::Overlaps(exp1, exp2) => write!(f, "{exp1} OVERLAPS {exp2}"),
            QueryExpression::Equals(exp1, exp2) => write!(f, "{exp1} EQUALS {exp2}"),
            QueryExpression::Precedes(pred) => {
                if pred.is_immediately() {
                    write!(f, "{} IMMEDIATELY PRECEDES {}", pred.exp1(), pred.exp2())
                } else {
                    write!(f, "{} PRECEDES {}", pred.exp1(), pred.exp2())
                }
            }
            QueryExpression::Succeeds(pred) => {
                if pred.is_immediately() {
                    write!(f, "{} IMMEDIATELY SUCCEEDS {}", pred.exp1(), pred.exp2())
                } else {
                    write!(f, "{} SUCCEEDS {}", pred.exp1(), pred.exp2())
                }
            }
            QueryExpression::Logical(op, exp1, exp2) => {
                write!(f, "{exp1} {} {exp2}", op.token())
            }
            QueryExpression::Not(exp) => write!(f, "NOT ({exp})"),
        }
    }
}

impl fmt::Display for ExpAsVar {
    /// Renders a projection column: `<exp> AS <name>` when the alias was
    /// written by the user, the bare expression when it was synthesized.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_anonymous() {
            write!(f, "{}", self.exp())
        } else {
            write!(f, "{} AS {}", self.exp(), self.name())
        }
    }
}
