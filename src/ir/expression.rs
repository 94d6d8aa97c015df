//! The value-expression IR.
//!
//! This module defines the closed expression tree a parsed query is built
//! from:
//! - Constants (integer, decimal, string, boolean, date, timestamp)
//! - Property access and the two temporal access forms
//! - Period construction and period length
//! - Comparison, temporal, and logical predicates
//!
//! Every node owns its children; the only shared references are the
//! [`ElementRef`] handles from accesses back to the pattern element they
//! read. Nodes are immutable once built, carry an [`ExpressionType`] tag
//! for O(1) dispatch, and compare structurally.

use std::fmt;

use smol_str::SmolStr;

use crate::diag::IrError;
use crate::ir::time::{TimeProperty, TimeUnit};
use crate::ir::variable::ElementRef;

// ============================================================================
// Expression type tags
// ============================================================================

/// Fast dispatch tag, one per concrete expression kind.
///
/// Downstream passes branch on this instead of inspecting the tree shape;
/// it is also what construction preconditions are stated in terms of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionType {
    ConstInteger,
    ConstDecimal,
    ConstString,
    ConstBoolean,
    ConstDate,
    ConstTimestamp,
    PropertyAccess,
    ElemTimeAccess,
    PropTimeAccess,
    Period,
    PeriodLength,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Overlaps,
    Equals,
    Precedes,
    Succeeds,
    And,
    Or,
    Not,
}

impl ExpressionType {
    /// Returns the tag's canonical name.
    pub const fn as_str(self) -> &'static str {
        match self {
            ExpressionType::ConstInteger => "CONST_INTEGER",
            ExpressionType::ConstDecimal => "CONST_DECIMAL",
            ExpressionType::ConstString => "CONST_STRING",
            ExpressionType::ConstBoolean => "CONST_BOOLEAN",
            ExpressionType::ConstDate => "CONST_DATE",
            ExpressionType::ConstTimestamp => "CONST_TIMESTAMP",
            ExpressionType::PropertyAccess => "PROPERTY_ACCESS",
            ExpressionType::ElemTimeAccess => "ELEM_TIME_ACCESS",
            ExpressionType::PropTimeAccess => "PROP_TIME_ACCESS",
            ExpressionType::Period => "PERIOD",
            ExpressionType::PeriodLength => "PERIOD_LENGTH",
            ExpressionType::Equal => "EQUAL",
            ExpressionType::NotEqual => "NOT_EQUAL",
            ExpressionType::Greater => "GREATER",
            ExpressionType::GreaterEqual => "GREATER_EQUAL",
            ExpressionType::Less => "LESS",
            ExpressionType::LessEqual => "LESS_EQUAL",
            ExpressionType::Overlaps => "OVERLAPS",
            ExpressionType::Equals => "EQUALS",
            ExpressionType::Precedes => "PRECEDES",
            ExpressionType::Succeeds => "SUCCEEDS",
            ExpressionType::And => "AND",
            ExpressionType::Or => "OR",
            ExpressionType::Not => "NOT",
        }
    }

    /// Returns true for the two time-access tags, the only shapes a
    /// period-length expression accepts.
    pub const fn is_time_access(self) -> bool {
        matches!(
            self,
            ExpressionType::ElemTimeAccess | ExpressionType::PropTimeAccess
        )
    }
}

impl fmt::Display for ExpressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Constants
// ============================================================================

/// A literal value.
///
/// Numeric and temporal literals preserve their source text so that
/// canonical printing reproduces what the user wrote and no precision is
/// lost before evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    /// Integer literal, original text.
    Integer(SmolStr),
    /// Decimal literal, original text.
    Decimal(SmolStr),
    /// String literal, unescaped content.
    String(SmolStr),
    /// Boolean literal.
    Boolean(bool),
    /// Date literal, the text between the quotes of `DATE '...'`.
    Date(SmolStr),
    /// Timestamp literal, the text between the quotes of `TIMESTAMP '...'`.
    Timestamp(SmolStr),
}

impl Constant {
    /// Integer constant from its literal text.
    pub fn integer(text: impl Into<SmolStr>) -> Self {
        Constant::Integer(text.into())
    }

    /// Decimal constant from its literal text.
    pub fn decimal(text: impl Into<SmolStr>) -> Self {
        Constant::Decimal(text.into())
    }

    /// String constant from its unescaped content.
    pub fn string(text: impl Into<SmolStr>) -> Self {
        Constant::String(text.into())
    }

    /// Boolean constant.
    pub fn boolean(value: bool) -> Self {
        Constant::Boolean(value)
    }

    /// Date constant from the text inside the quotes.
    pub fn date(text: impl Into<SmolStr>) -> Self {
        Constant::Date(text.into())
    }

    /// Timestamp constant from the text inside the quotes.
    pub fn timestamp(text: impl Into<SmolStr>) -> Self {
        Constant::Timestamp(text.into())
    }

    /// Returns the tag for this constant.
    pub const fn expression_type(&self) -> ExpressionType {
        match self {
            Constant::Integer(_) => ExpressionType::ConstInteger,
            Constant::Decimal(_) => ExpressionType::ConstDecimal,
            Constant::String(_) => ExpressionType::ConstString,
            Constant::Boolean(_) => ExpressionType::ConstBoolean,
            Constant::Date(_) => ExpressionType::ConstDate,
            Constant::Timestamp(_) => ExpressionType::ConstTimestamp,
        }
    }
}

// ============================================================================
// Accesses
// ============================================================================

/// `<variable>.<property>` — reads a property of a pattern element.
///
/// Unquoted property names are case-insensitive in the query and stored
/// upper-cased; quoted names preserve their exact spelling and remember
/// that they were quoted so the printer can reproduce it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyAccess {
    variable: ElementRef,
    property_name: SmolStr,
    quoted: bool,
}

impl PropertyAccess {
    /// Access via an unquoted property name; the name is upper-cased.
    pub fn new(variable: ElementRef, property_name: &str) -> Self {
        Self {
            variable,
            property_name: property_name.to_ascii_uppercase().into(),
            quoted: false,
        }
    }

    /// Access via a quoted property name; spelling is preserved.
    pub fn quoted(variable: ElementRef, property_name: impl Into<SmolStr>) -> Self {
        Self {
            variable,
            property_name: property_name.into(),
            quoted: true,
        }
    }

    /// Returns the pattern element being read.
    pub fn variable(&self) -> &ElementRef {
        &self.variable
    }

    /// Returns the property name in stored (canonical) form.
    pub fn property_name(&self) -> &SmolStr {
        &self.property_name
    }

    /// Returns true if the property name was quoted in the query.
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }
}

/// `<variable>.<TIME_PROPERTY>` — a temporal attribute of the element
/// itself, e.g. `v.TX_TIME`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElemTimeAccess {
    variable: ElementRef,
    time_property: TimeProperty,
}

impl ElemTimeAccess {
    /// Creates a temporal access on a pattern element.
    pub fn new(variable: ElementRef, time_property: TimeProperty) -> Self {
        Self {
            variable,
            time_property,
        }
    }

    /// Returns the pattern element being read.
    pub fn variable(&self) -> &ElementRef {
        &self.variable
    }

    /// Returns which temporal attribute is accessed.
    pub fn time_property(&self) -> TimeProperty {
        self.time_property
    }
}

/// `<variable>.<property>.<TIME_PROPERTY>` — a temporal attribute of a
/// property value, e.g. `v.PROP.TX_TIME`.
///
/// Kept distinct from [`ElemTimeAccess`]: the printed form, the allowed
/// attribute set, and the validation rules against the element type all
/// differ between the two.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropTimeAccess {
    property_access: PropertyAccess,
    time_property: TimeProperty,
}

impl PropTimeAccess {
    /// Creates a temporal access on a property value.
    pub fn new(property_access: PropertyAccess, time_property: TimeProperty) -> Self {
        Self {
            property_access,
            time_property,
        }
    }

    /// Returns the wrapped property access.
    pub fn property_access(&self) -> &PropertyAccess {
        &self.property_access
    }

    /// Returns which temporal attribute is accessed.
    pub fn time_property(&self) -> TimeProperty {
        self.time_property
    }
}

// ============================================================================
// Period construction and length
// ============================================================================

/// `PERIOD(<begin>, <end>)` — an interval value built from two bounds.
///
/// Each bound may independently be a timestamp constant or a time access;
/// no ordering is enforced between them. Interval orientation is a
/// semantic concern decided by the validator, not a syntactic one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Period {
    beginning_bound: Box<QueryExpression>,
    ending_bound: Box<QueryExpression>,
}

impl Period {
    /// Creates a period from its two bounds.
    pub fn new(beginning_bound: QueryExpression, ending_bound: QueryExpression) -> Self {
        Self {
            beginning_bound: Box::new(beginning_bound),
            ending_bound: Box::new(ending_bound),
        }
    }

    /// Returns the beginning bound.
    pub fn beginning_bound(&self) -> &QueryExpression {
        &self.beginning_bound
    }

    /// Returns the ending bound.
    pub fn ending_bound(&self) -> &QueryExpression {
        &self.ending_bound
    }
}

/// `LENGTH(<UNIT>, <time access>)` — the length of an interval expressed
/// in a time unit.
///
/// The inner expression must be an element or property time access; the
/// grammar only ever builds it from one of those two shapes, so anything
/// else is rejected at construction. The unit defaults to microseconds
/// when the query leaves it implicit, and the printer always renders it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeriodLengthExpression {
    exp: Box<QueryExpression>,
    unit: TimeUnit,
}

impl PeriodLengthExpression {
    /// Creates a period-length expression over a time access.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::IllegalPeriodLengthOperand`] when `exp` is not
    /// an [`ElemTimeAccess`] or [`PropTimeAccess`] node.
    pub fn new(exp: QueryExpression, unit: TimeUnit) -> Result<Self, IrError> {
        let found = exp.expression_type();
        if !found.is_time_access() {
            return Err(IrError::IllegalPeriodLengthOperand { found });
        }
        Ok(Self {
            exp: Box::new(exp),
            unit,
        })
    }

    /// Creates a period-length expression with the default unit
    /// (microseconds), for queries that leave the unit implicit.
    pub fn with_default_unit(exp: QueryExpression) -> Result<Self, IrError> {
        Self::new(exp, TimeUnit::default())
    }

    /// Returns the inner time access.
    pub fn exp(&self) -> &QueryExpression {
        &self.exp
    }

    /// Returns the time unit, defaulted or explicit.
    pub fn time_unit(&self) -> TimeUnit {
        self.unit
    }
}

// ============================================================================
// Predicates and connectives
// ============================================================================

/// Binary comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

impl ComparisonOperator {
    /// Returns the surface-syntax token.
    pub const fn token(self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "<>",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::GreaterEqual => ">=",
            ComparisonOperator::Less => "<",
            ComparisonOperator::LessEqual => "<=",
        }
    }

    /// Returns the tag for a comparison with this operator.
    pub const fn expression_type(self) -> ExpressionType {
        match self {
            ComparisonOperator::Equal => ExpressionType::Equal,
            ComparisonOperator::NotEqual => ExpressionType::NotEqual,
            ComparisonOperator::Greater => ExpressionType::Greater,
            ComparisonOperator::GreaterEqual => ExpressionType::GreaterEqual,
            ComparisonOperator::Less => ExpressionType::Less,
            ComparisonOperator::LessEqual => ExpressionType::LessEqual,
        }
    }
}

/// Binary logical connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    /// Returns the surface-syntax token.
    pub const fn token(self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }

    /// Returns the tag for a connective with this operator.
    pub const fn expression_type(self) -> ExpressionType {
        match self {
            LogicalOperator::And => ExpressionType::And,
            LogicalOperator::Or => ExpressionType::Or,
        }
    }
}

/// Operands of a `PRECEDES` or `SUCCEEDS` predicate.
///
/// Operand order and the `immediately` flag are preserved exactly as the
/// user wrote them: `a PRECEDES b` and `b SUCCEEDS a` are distinct IR even
/// if an evaluator later normalizes one to the other, because canonical
/// printing and diagnostics are order-sensitive. `immediately` requires
/// adjacency (no gap) rather than mere ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderingPredicate {
    exp1: Box<QueryExpression>,
    exp2: Box<QueryExpression>,
    immediately: bool,
}

impl OrderingPredicate {
    /// Creates the operand pair for an ordering predicate.
    pub fn new(exp1: QueryExpression, exp2: QueryExpression, immediately: bool) -> Self {
        Self {
            exp1: Box::new(exp1),
            exp2: Box::new(exp2),
            immediately,
        }
    }

    /// Returns the left operand.
    pub fn exp1(&self) -> &QueryExpression {
        &self.exp1
    }

    /// Returns the right operand.
    pub fn exp2(&self) -> &QueryExpression {
        &self.exp2
    }

    /// Returns true for the `IMMEDIATELY` form.
    pub fn is_immediately(&self) -> bool {
        self.immediately
    }
}

// ============================================================================
// QueryExpression - the closed expression tree
// ============================================================================

/// Any value expression in a query.
///
/// A closed sum type with exhaustive matching everywhere it is consumed;
/// adding a variant is a compile-time event for every pass, which is the
/// point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryExpression {
    /// Literal constant.
    Constant(Constant),

    /// `<variable>.<property>`
    PropertyAccess(PropertyAccess),

    /// `<variable>.<TIME_PROPERTY>`
    ElemTimeAccess(ElemTimeAccess),

    /// `<variable>.<property>.<TIME_PROPERTY>`
    PropTimeAccess(PropTimeAccess),

    /// `PERIOD(<begin>, <end>)`
    Period(Period),

    /// `LENGTH(<UNIT>, <time access>)`
    PeriodLength(PeriodLengthExpression),

    /// Binary comparison (`=`, `<>`, `>`, `>=`, `<`, `<=`).
    Comparison(
        ComparisonOperator,
        Box<QueryExpression>,
        Box<QueryExpression>,
    ),

    /// `<exp1> OVERLAPS <exp2>` — the intervals share at least one instant.
    Overlaps(Box<QueryExpression>, Box<QueryExpression>),

    /// `<exp1> EQUALS <exp2>` — the intervals coincide exactly.
    Equals(Box<QueryExpression>, Box<QueryExpression>),

    /// `<exp1> [IMMEDIATELY] PRECEDES <exp2>`
    Precedes(OrderingPredicate),

    /// `<exp1> [IMMEDIATELY] SUCCEEDS <exp2>`
    Succeeds(OrderingPredicate),

    /// Binary logical connective (AND, OR).
    Logical(LogicalOperator, Box<QueryExpression>, Box<QueryExpression>),

    /// Logical negation.
    Not(Box<QueryExpression>),
}

impl QueryExpression {
    /// Returns the dispatch tag for this node.
    pub fn expression_type(&self) -> ExpressionType {
        match self {
            QueryExpression::Constant(constant) => constant.expression_type(),
            QueryExpression::PropertyAccess(_) => ExpressionType::PropertyAccess,
            QueryExpression::ElemTimeAccess(_) => ExpressionType::ElemTimeAccess,
            QueryExpression::PropTimeAccess(_) => ExpressionType::PropTimeAccess,
            QueryExpression::Period(_) => ExpressionType::Period,
            QueryExpression::PeriodLength(_) => ExpressionType::PeriodLength,
            QueryExpression::Comparison(op, _, _) => op.expression_type(),
            QueryExpression::Overlaps(_, _) => ExpressionType::Overlaps,
            QueryExpression::Equals(_, _) => ExpressionType::Equals,
            QueryExpression::Precedes(_) => ExpressionType::Precedes,
            QueryExpression::Succeeds(_) => ExpressionType::Succeeds,
            QueryExpression::Logical(op, _, _) => op.expression_type(),
            QueryExpression::Not(_) => ExpressionType::Not,
        }
    }

    /// Builds a comparison node.
    pub fn comparison(op: ComparisonOperator, exp1: QueryExpression, exp2: QueryExpression) -> Self {
        QueryExpression::Comparison(op, Box::new(exp1), Box::new(exp2))
    }

    /// Builds an `OVERLAPS` predicate.
    pub fn overlaps(exp1: QueryExpression, exp2: QueryExpression) -> Self {
        QueryExpression::Overlaps(Box::new(exp1), Box::new(exp2))
    }

    /// Builds an `EQUALS` predicate.
    pub fn equals(exp1: QueryExpression, exp2: QueryExpression) -> Self {
        QueryExpression::Equals(Box::new(exp1), Box::new(exp2))
    }

    /// Builds a `PRECEDES` predicate.
    pub fn precedes(exp1: QueryExpression, exp2: QueryExpression, immediately: bool) -> Self {
        QueryExpression::Precedes(OrderingPredicate::new(exp1, exp2, immediately))
    }

    /// Builds a `SUCCEEDS` predicate.
    pub fn succeeds(exp1: QueryExpression, exp2: QueryExpression, immediately: bool) -> Self {
        QueryExpression::Succeeds(OrderingPredicate::new(exp1, exp2, immediately))
    }

    /// Builds a logical connective.
    pub fn logical(op: LogicalOperator, exp1: QueryExpression, exp2: QueryExpression) -> Self {
        QueryExpression::Logical(op, Box::new(exp1), Box::new(exp2))
    }

    /// Builds a negation.
    pub fn not(exp: QueryExpression) -> Self {
        QueryExpression::Not(Box::new(exp))
    }
}
