//! Bitemporal property-graph query IR.
//!
//! This library provides the intermediate representation for a
//! declarative property-graph query language with bitemporal extensions:
//! graph-pattern variables, a closed value-expression tree (including
//! transaction-time/valid-time access, period construction, Allen-style
//! interval predicates, and interval length), canonical printing, and a
//! visitor protocol for external passes. Construction errors report
//! through miette diagnostics.
//!
//! # Example
//!
//! ```
//! use pgq_ir::{ElemTimeAccess, GraphPatternElement, QueryExpression, TimeProperty};
//!
//! # fn main() -> Result<(), pgq_ir::IrError> {
//! let v = GraphPatternElement::vertex("v", false)?;
//! let access = QueryExpression::ElemTimeAccess(
//!     ElemTimeAccess::new(v, TimeProperty::TxFrom),
//! );
//!
//! // The canonical rendering keeps the variable's spelling and
//! // upper-cases the temporal attribute.
//! assert_eq!(access.to_string(), "v.TX_FROM");
//! # Ok(())
//! # }
//! ```

pub mod diag;
pub mod ir;

// Re-export the IR surface for convenience.
pub use diag::IrError;
pub use ir::{
    ComparisonOperator, Constant, ElemTimeAccess, ElementKind, ElementRef, ExpAsVar,
    ExpressionType, GraphPatternElement, IrVisitor, LogicalOperator, OrderingPredicate, Period,
    PeriodLengthExpression, PropTimeAccess, PropertyAccess, QueryExpression, TimeProperty,
    TimeUnit, VariableKind, VisitResult, period_length, print_expression,
};
