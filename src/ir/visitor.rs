//! IR visitor infrastructure.
//!
//! External passes (the semantic validator, optimizers, the correlation
//! resolver) traverse the IR through [`IrVisitor`] without the IR
//! depending on them: a new pass is a new visitor implementation, never a
//! new branch inside the node types. Nodes offer `accept` for double
//! dispatch; default trait methods delegate to the free `walk_*` functions
//! so an implementation overrides only the kinds it cares about.
//!
//! Traversal guarantees only that each owned child is visited exactly
//! once. Element references held by accesses are additionally surfaced
//! through [`IrVisitor::visit_element`] so passes can observe variable
//! usage; those are non-owning and may be reported once per reference.

use std::ops::ControlFlow;

use crate::ir::expression::{
    ComparisonOperator, Constant, ElemTimeAccess, LogicalOperator, OrderingPredicate, Period,
    PeriodLengthExpression, PropTimeAccess, PropertyAccess, QueryExpression,
};
use crate::ir::variable::{ElementKind, ExpAsVar, GraphPatternElement};

macro_rules! try_visit {
    ($expr:expr) => {
        match $expr {
            ControlFlow::Continue(()) => {}
            ControlFlow::Break(b) => return ControlFlow::Break(b),
        }
    };
}

/// Shared type alias for visitor traversal methods.
pub type VisitResult<B> = ControlFlow<B>;

/// Immutable visitor over expression trees and variables.
pub trait IrVisitor {
    /// Early-exit payload produced when traversal stops.
    type Break;

    fn visit_expression(&mut self, expression: &QueryExpression) -> VisitResult<Self::Break> {
        walk_expression(self, expression)
    }

    fn visit_constant(&mut self, _constant: &Constant) -> VisitResult<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_property_access(&mut self, access: &PropertyAccess) -> VisitResult<Self::Break> {
        walk_property_access(self, access)
    }

    fn visit_elem_time_access(&mut self, access: &ElemTimeAccess) -> VisitResult<Self::Break> {
        walk_elem_time_access(self, access)
    }

    fn visit_prop_time_access(&mut self, access: &PropTimeAccess) -> VisitResult<Self::Break> {
        walk_prop_time_access(self, access)
    }

    fn visit_period(&mut self, period: &Period) -> VisitResult<Self::Break> {
        walk_period(self, period)
    }

    fn visit_period_length(
        &mut self,
        length: &PeriodLengthExpression,
    ) -> VisitResult<Self::Break> {
        walk_period_length(self, length)
    }

    fn visit_comparison(
        &mut self,
        op: ComparisonOperator,
        exp1: &QueryExpression,
        exp2: &QueryExpression,
    ) -> VisitResult<Self::Break> {
        let _ = op;
        walk_operands(self, exp1, exp2)
    }

    fn visit_overlaps(
        &mut self,
        exp1: &QueryExpression,
        exp2: &QueryExpression,
    ) -> VisitResult<Self::Break> {
        walk_operands(self, exp1, exp2)
    }

    fn visit_equals(
        &mut self,
        exp1: &QueryExpression,
        exp2: &QueryExpression,
    ) -> VisitResult<Self::Break> {
        walk_operands(self, exp1, exp2)
    }

    fn visit_precedes(&mut self, predicate: &OrderingPredicate) -> VisitResult<Self::Break> {
        walk_ordering_predicate(self, predicate)
    }

    fn visit_succeeds(&mut self, predicate: &OrderingPredicate) -> VisitResult<Self::Break> {
        walk_ordering_predicate(self, predicate)
    }

    fn visit_logical(
        &mut self,
        op: LogicalOperator,
        exp1: &QueryExpression,
        exp2: &QueryExpression,
    ) -> VisitResult<Self::Break> {
        let _ = op;
        walk_operands(self, exp1, exp2)
    }

    fn visit_not(&mut self, exp: &QueryExpression) -> VisitResult<Self::Break> {
        walk_not(self, exp)
    }

    fn visit_element(&mut self, element: &GraphPatternElement) -> VisitResult<Self::Break> {
        walk_element(self, element)
    }

    fn visit_vertex(&mut self, _vertex: &GraphPatternElement) -> VisitResult<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_edge(&mut self, _edge: &GraphPatternElement) -> VisitResult<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_path(&mut self, _path: &GraphPatternElement) -> VisitResult<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_exp_as_var(&mut self, exp_as_var: &ExpAsVar) -> VisitResult<Self::Break> {
        walk_exp_as_var(self, exp_as_var)
    }
}

/// Dispatches an expression to the handler for its concrete kind.
pub fn walk_expression<V: IrVisitor + ?Sized>(
    visitor: &mut V,
    expression: &QueryExpression,
) -> VisitResult<V::Break> {
    match expression {
        QueryExpression::Constant(constant) => visitor.visit_constant(constant),
        QueryExpression::PropertyAccess(access) => visitor.visit_property_access(access),
        QueryExpression::ElemTimeAccess(access) => visitor.visit_elem_time_access(access),
        QueryExpression::PropTimeAccess(access) => visitor.visit_prop_time_access(access),
        QueryExpression::Period(period) => visitor.visit_period(period),
        QueryExpression::PeriodLength(length) => visitor.visit_period_length(length),
        QueryExpression::Comparison(op, exp1, exp2) => visitor.visit_comparison(*op, exp1, exp2),
        QueryExpression::Overlaps(exp1, exp2) => visitor.visit_overlaps(exp1, exp2),
        QueryExpression::Equals(exp1, exp2) => visitor.visit_equals(exp1, exp2),
        QueryExpression::Precedes(predicate) => visitor.visit_precedes(predicate),
        QueryExpression::Succeeds(predicate) => visitor.visit_succeeds(predicate),
        QueryExpression::Logical(op, exp1, exp2) => visitor.visit_logical(*op, exp1, exp2),
        QueryExpression::Not(exp) => visitor.visit_not(exp),
    }
}

/// Surfaces the referenced element of a property access.
pub fn walk_property_access<V: IrVisitor + ?Sized>(
    visitor: &mut V,
    access: &PropertyAccess,
) -> VisitResult<V::Break> {
    visitor.visit_element(access.variable())
}

/// Surfaces the referenced element of an element time access.
pub fn walk_elem_time_access<V: IrVisitor + ?Sized>(
    visitor: &mut V,
    access: &ElemTimeAccess,
) -> VisitResult<V::Break> {
    visitor.visit_element(access.variable())
}

/// Descends into the wrapped property access.
pub fn walk_prop_time_access<V: IrVisitor + ?Sized>(
    visitor: &mut V,
    access: &PropTimeAccess,
) -> VisitResult<V::Break> {
    visitor.visit_property_access(access.property_access())
}

/// Visits both bounds of a period.
pub fn walk_period<V: IrVisitor + ?Sized>(
    visitor: &mut V,
    period: &Period,
) -> VisitResult<V::Break> {
    try_visit!(visitor.visit_expression(period.beginning_bound()));
    visitor.visit_expression(period.ending_bound())
}

/// Visits the inner time access of a period-length expression.
pub fn walk_period_length<V: IrVisitor + ?Sized>(
    visitor: &mut V,
    length: &PeriodLengthExpression,
) -> VisitResult<V::Break> {
    visitor.visit_expression(length.exp())
}

/// Visits the negated expression.
pub fn walk_not<V: IrVisitor + ?Sized>(
    visitor: &mut V,
    exp: &QueryExpression,
) -> VisitResult<V::Break> {
    visitor.visit_expression(exp)
}

/// Visits both operands of a binary node, left to right.
pub fn walk_operands<V: IrVisitor + ?Sized>(
    visitor: &mut V,
    exp1: &QueryExpression,
    exp2: &QueryExpression,
) -> VisitResult<V::Break> {
    try_visit!(visitor.visit_expression(exp1));
    visitor.visit_expression(exp2)
}

/// Visits both operands of an ordering predicate, left to right.
pub fn walk_ordering_predicate<V: IrVisitor + ?Sized>(
    visitor: &mut V,
    predicate: &OrderingPredicate,
) -> VisitResult<V::Break> {
    try_visit!(visitor.visit_expression(predicate.exp1()));
    visitor.visit_expression(predicate.exp2())
}

/// Dispatches an element to the handler for its kind.
pub fn walk_element<V: IrVisitor + ?Sized>(
    visitor: &mut V,
    element: &GraphPatternElement,
) -> VisitResult<V::Break> {
    match element.kind() {
        ElementKind::Vertex => visitor.visit_vertex(element),
        ElementKind::Edge => visitor.visit_edge(element),
        ElementKind::Path => visitor.visit_path(element),
    }
}

/// Visits the projected expression of an `exp AS var` column.
pub fn walk_exp_as_var<V: IrVisitor + ?Sized>(
    visitor: &mut V,
    exp_as_var: &ExpAsVar,
) -> VisitResult<V::Break> {
    visitor.visit_expression(exp_as_var.exp())
}

impl QueryExpression {
    /// Double dispatch into the visitor's handler for this node's kind.
    pub fn accept<V: IrVisitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        visitor.visit_expression(self)
    }
}

impl GraphPatternElement {
    /// Double dispatch into the visitor's handler for this element's kind.
    pub fn accept<V: IrVisitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        visitor.visit_element(self)
    }
}

impl ExpAsVar {
    /// Double dispatch into the visitor's exp-as-var handler.
    pub fn accept<V: IrVisitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        visitor.visit_exp_as_var(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::time::{TimeProperty, TimeUnit};
    use crate::ir::variable::{ElementRef, GraphPatternElement};

    #[derive(Default)]
    struct KindCounter {
        constants: usize,
        property_accesses: usize,
        elem_time_accesses: usize,
        prop_time_accesses: usize,
        periods: usize,
        period_lengths: usize,
        comparisons: usize,
        overlaps: usize,
        equals: usize,
        precedes: usize,
        succeeds: usize,
        logicals: usize,
        nots: usize,
    }

    impl IrVisitor for KindCounter {
        type Break = ();

        fn visit_constant(&mut self, _constant: &Constant) -> VisitResult<()> {
            self.constants += 1;
            ControlFlow::Continue(())
        }

        fn visit_property_access(&mut self, access: &PropertyAccess) -> VisitResult<()> {
            self.property_accesses += 1;
            walk_property_access(self, access)
        }

        fn visit_elem_time_access(&mut self, access: &ElemTimeAccess) -> VisitResult<()> {
            self.elem_time_accesses += 1;
            walk_elem_time_access(self, access)
        }

        fn visit_prop_time_access(&mut self, access: &PropTimeAccess) -> VisitResult<()> {
            self.prop_time_accesses += 1;
            walk_prop_time_access(self, access)
        }

        fn visit_period(&mut self, period: &Period) -> VisitResult<()> {
            self.periods += 1;
            walk_period(self, period)
        }

        fn visit_period_length(&mut self, length: &PeriodLengthExpression) -> VisitResult<()> {
            self.period_lengths += 1;
            walk_period_length(self, length)
        }

        fn visit_comparison(
            &mut self,
            op: ComparisonOperator,
            exp1: &QueryExpression,
            exp2: &QueryExpression,
        ) -> VisitResult<()> {
            let _ = op;
            self.comparisons += 1;
            walk_operands(self, exp1, exp2)
        }

        fn visit_overlaps(
            &mut self,
            exp1: &QueryExpression,
            exp2: &QueryExpression,
        ) -> VisitResult<()> {
            self.overlaps += 1;
            walk_operands(self, exp1, exp2)
        }

        fn visit_equals(
            &mut self,
            exp1: &QueryExpression,
            exp2: &QueryExpression,
        ) -> VisitResult<()> {
            self.equals += 1;
            walk_operands(self, exp1, exp2)
        }

        fn visit_precedes(&mut self, predicate: &OrderingPredicate) -> VisitResult<()> {
            self.precedes += 1;
            walk_ordering_predicate(self, predicate)
        }

        fn visit_succeeds(&mut self, predicate: &OrderingPredicate) -> VisitResult<()> {
            self.succeeds += 1;
            walk_ordering_predicate(self, predicate)
        }

        fn visit_logical(
            &mut self,
            op: LogicalOperator,
            exp1: &QueryExpression,
            exp2: &QueryExpression,
        ) -> VisitResult<()> {
            let _ = op;
            self.logicals += 1;
            walk_operands(self, exp1, exp2)
        }

        fn visit_not(&mut self, exp: &QueryExpression) -> VisitResult<()> {
            self.nots += 1;
            walk_not(self, exp)
        }
    }

    fn vertex(name: &str) -> ElementRef {
        GraphPatternElement::vertex(name, false).unwrap()
    }

    /// A tree containing every expression kind exactly once at the top
    /// level of its sub-feature.
    fn every_kind_tree() -> QueryExpression {
        let elem_access =
            QueryExpression::ElemTimeAccess(ElemTimeAccess::new(vertex("x"), TimeProperty::TxTime));
        let prop_access = QueryExpression::PropTimeAccess(PropTimeAccess::new(
            PropertyAccess::new(vertex("y"), "prop"),
            TimeProperty::ValTime,
        ));
        let period = QueryExpression::Period(Period::new(
            QueryExpression::Constant(Constant::timestamp("2020-01-01 01:00:00")),
            QueryExpression::Constant(Constant::timestamp("2020-01-01 02:00:00")),
        ));
        let length = QueryExpression::PeriodLength(
            PeriodLengthExpression::new(elem_access.clone(), TimeUnit::Day).unwrap(),
        );

        let overlaps = QueryExpression::overlaps(elem_access.clone(), prop_access.clone());
        let equals = QueryExpression::equals(prop_access.clone(), period.clone());
        let precedes = QueryExpression::precedes(elem_access.clone(), period.clone(), true);
        let succeeds = QueryExpression::succeeds(period, elem_access, false);
        let comparison = QueryExpression::comparison(
            ComparisonOperator::Greater,
            length,
            QueryExpression::Constant(Constant::integer("100")),
        );
        let plain_access =
            QueryExpression::PropertyAccess(PropertyAccess::new(vertex("z"), "name"));
        let string_check = QueryExpression::comparison(
            ComparisonOperator::Equal,
            plain_access,
            QueryExpression::Constant(Constant::string("alice")),
        );

        QueryExpression::logical(
            LogicalOperator::And,
            QueryExpression::logical(LogicalOperator::Or, overlaps, equals),
            QueryExpression::logical(
                LogicalOperator::And,
                QueryExpression::logical(LogicalOperator::And, precedes, succeeds),
                QueryExpression::logical(
                    LogicalOperator::And,
                    comparison,
                    QueryExpression::not(string_check),
                ),
            ),
        )
    }

    #[test]
    fn every_kind_is_dispatched_without_fallback() {
        let tree = every_kind_tree();
        let mut counter = KindCounter::default();
        let flow = tree.accept(&mut counter);
        assert!(matches!(flow, ControlFlow::Continue(())));

        assert_eq!(counter.overlaps, 1);
        assert_eq!(counter.equals, 1);
        assert_eq!(counter.precedes, 1);
        assert_eq!(counter.succeeds, 1);
        assert_eq!(counter.comparisons, 2);
        assert_eq!(counter.logicals, 5);
        assert_eq!(counter.nots, 1);
        assert_eq!(counter.period_lengths, 1);
        // Two bounds per period, three predicate operands holding periods.
        assert_eq!(counter.periods, 3);
        assert_eq!(counter.elem_time_accesses, 4);
        assert_eq!(counter.prop_time_accesses, 2);
        // One plain access plus the two wrapped by prop time accesses.
        assert_eq!(counter.property_accesses, 3);
        // Six period bounds, the integer, and the string.
        assert_eq!(counter.constants, 8);
    }

    #[test]
    fn traversal_supports_early_exit() {
        struct StopAtFirstConstant;

        impl IrVisitor for StopAtFirstConstant {
            type Break = Constant;

            fn visit_constant(&mut self, constant: &Constant) -> VisitResult<Constant> {
                ControlFlow::Break(constant.clone())
            }
        }

        let tree = every_kind_tree();
        let flow = tree.accept(&mut StopAtFirstConstant);
        assert!(matches!(flow, ControlFlow::Break(_)));
    }

    #[test]
    fn elements_dispatch_by_kind() {
        struct KindRecorder(Vec<&'static str>);

        impl IrVisitor for KindRecorder {
            type Break = ();

            fn visit_vertex(&mut self, _vertex: &GraphPatternElement) -> VisitResult<()> {
                self.0.push("vertex");
                ControlFlow::Continue(())
            }

            fn visit_edge(&mut self, _edge: &GraphPatternElement) -> VisitResult<()> {
                self.0.push("edge");
                ControlFlow::Continue(())
            }

            fn visit_path(&mut self, _path: &GraphPatternElement) -> VisitResult<()> {
                self.0.push("path");
                ControlFlow::Continue(())
            }
        }

        let mut recorder = KindRecorder(Vec::new());
        let _ = GraphPatternElement::vertex("v", false).unwrap().accept(&mut recorder);
        let _ = GraphPatternElement::edge("e", false).unwrap().accept(&mut recorder);
        let _ = GraphPatternElement::path("p", false).unwrap().accept(&mut recorder);
        assert_eq!(recorder.0, ["vertex", "edge", "path"]);
    }

    #[test]
    fn exp_as_var_traversal_reaches_projected_expression() {
        struct CountConstants(usize);

        impl IrVisitor for CountConstants {
            type Break = ();

            fn visit_constant(&mut self, _constant: &Constant) -> VisitResult<()> {
                self.0 += 1;
                ControlFlow::Continue(())
            }
        }

        let column = ExpAsVar::new(
            QueryExpression::Constant(Constant::integer("1")),
            "n",
            false,
        )
        .unwrap();
        let mut counter = CountConstants(0);
        let _ = column.accept(&mut counter);
        assert_eq!(counter.0, 1);
    }
}
