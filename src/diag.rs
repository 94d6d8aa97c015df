//! Construction-error diagnostics for the IR.
//!
//! The IR has no recoverable internal failure modes: printing is total and
//! equality never fails. What can go wrong is a caller (normally the
//! surface-syntax parser) handing a factory an operand shape the syntax
//! can never produce. Those violations surface synchronously as
//! [`IrError`] values; the parser is responsible for attaching source
//! positions and turning them into user-facing reports.

use std::fmt;

use miette::{Diagnostic, Severity};
use smol_str::SmolStr;

use crate::ir::expression::ExpressionType;

/// An IR construction-precondition violation.
///
/// Every variant indicates a parser-contract bug, not a user error: the
/// surface grammar cannot produce the rejected shapes, so reaching one of
/// these means the caller built a node by hand incorrectly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrError {
    /// A period-length expression was built over something other than a
    /// time access.
    IllegalPeriodLengthOperand {
        /// The expression kind that was actually supplied.
        found: ExpressionType,
    },
    /// A variable was given an empty name.
    EmptyVariableName,
    /// A variable was given an empty unique identifier.
    EmptyUniqueIdentifier,
    /// A temporal attribute name did not match any known attribute.
    UnknownTimeProperty(SmolStr),
    /// A time-unit name did not match any supported unit.
    UnknownTimeUnit(SmolStr),
}

impl fmt::Display for IrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrError::IllegalPeriodLengthOperand { found } => write!(
                f,
                "LENGTH expects an element or property time access, found {found}"
            ),
            IrError::EmptyVariableName => {
                write!(f, "variable name must not be empty")
            }
            IrError::EmptyUniqueIdentifier => {
                write!(f, "variable unique identifier must not be empty")
            }
            IrError::UnknownTimeProperty(name) => {
                write!(f, "unknown temporal attribute `{name}`")
            }
            IrError::UnknownTimeUnit(name) => write!(f, "unknown time unit `{name}`"),
        }
    }
}

impl std::error::Error for IrError {}

impl Diagnostic for IrError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self {
            IrError::IllegalPeriodLengthOperand { .. } => "ir::illegal_period_length_operand",
            IrError::EmptyVariableName => "ir::empty_variable_name",
            IrError::EmptyUniqueIdentifier => "ir::empty_unique_identifier",
            IrError::UnknownTimeProperty(_) => "ir::unknown_time_property",
            IrError::UnknownTimeUnit(_) => "ir::unknown_time_unit",
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Error)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            IrError::IllegalPeriodLengthOperand { .. } => Some(Box::new(
                "pass the temporal attribute itself, e.g. LENGTH(v.TX_TIME) \
                 or LENGTH(v.PROP.VAL_TIME)",
            )),
            IrError::EmptyVariableName => Some(Box::new(
                "anonymous variables still carry a synthesized name; assign \
                 one before constructing the variable",
            )),
            IrError::EmptyUniqueIdentifier => Some(Box::new(
                "unique identifiers are assigned at construction and must be \
                 non-empty; they default to the variable name",
            )),
            IrError::UnknownTimeProperty(_) => Some(Box::new(
                "expected one of TX_TIME, VAL_TIME, TX_FROM, TX_TO, VAL_FROM, VAL_TO",
            )),
            IrError::UnknownTimeUnit(_) => Some(Box::new(
                "expected one of YEAR, QUARTER, WEEK, DAY, HOUR, MINUTE, \
                 SECOND, MILLISECOND, MICROSECOND",
            )),
        }
    }
}
