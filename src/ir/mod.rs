//! Intermediate representation for bitemporal property-graph queries.
//!
//! The surface-syntax parser builds this IR; the semantic validator and
//! the execution engine consume it. Four things hold it together:
//!
//! - A variable model with stable, structural identity
//!   ([`variable`]).
//! - A closed expression tree with a temporal extension — time access,
//!   period construction, interval predicates, interval length
//!   ([`expression`], [`time`]).
//! - A canonical printer whose output round-trips through the parser;
//!   equal trees always print identically ([`print`]).
//! - A visitor protocol that lets external passes traverse the tree
//!   without the tree depending on them ([`visitor`], [`visitors`]).
//!
//! The tree is immutable after construction except for two documented
//! points: element renaming and the rebindable expression slot of a
//! projected column. One query's IR belongs to one thread.

pub mod expression;
pub mod print;
pub mod time;
pub mod variable;
pub mod visitor;
pub mod visitors;

pub use expression::{
    ComparisonOperator, Constant, ElemTimeAccess, ExpressionType, LogicalOperator,
    OrderingPredicate, Period, PeriodLengthExpression, PropTimeAccess, PropertyAccess,
    QueryExpression,
};
pub use print::print_expression;
pub use time::{TimeProperty, TimeUnit, period_length};
pub use variable::{ElementKind, ElementRef, ExpAsVar, GraphPatternElement, VariableKind};
pub use visitor::{IrVisitor, VisitResult};
