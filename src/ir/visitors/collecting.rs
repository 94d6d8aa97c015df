//! Generic node collection visitor.

use std::ops::ControlFlow;

use crate::ir::expression::{
    Constant, ElemTimeAccess, Period, PeriodLengthExpression, PropTimeAccess, PropertyAccess,
};
use crate::ir::variable::GraphPatternElement;
use crate::ir::visitor::{
    IrVisitor, walk_elem_time_access, walk_element, walk_period, walk_period_length,
    walk_prop_time_access, walk_property_access,
};

/// Borrowed IR node view used by [`CollectingVisitor`].
#[derive(Debug, Clone, Copy)]
pub enum IrNode<'a> {
    Constant(&'a Constant),
    PropertyAccess(&'a PropertyAccess),
    ElemTimeAccess(&'a ElemTimeAccess),
    PropTimeAccess(&'a PropTimeAccess),
    Period(&'a Period),
    PeriodLength(&'a PeriodLengthExpression),
    Element(&'a GraphPatternElement),
}

/// Visitor that collects values produced by a node-matching closure.
#[derive(Debug)]
pub struct CollectingVisitor<T, F> {
    matcher: F,
    items: Vec<T>,
}

impl<T, F> CollectingVisitor<T, F>
where
    F: for<'a> FnMut(IrNode<'a>) -> Option<T>,
{
    /// Creates a collecting visitor.
    pub fn new(matcher: F) -> Self {
        Self {
            matcher,
            items: Vec::new(),
        }
    }

    /// Returns collected values.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns collected values, consuming the visitor.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    fn maybe_collect<'a>(&mut self, node: IrNode<'a>) {
        if let Some(item) = (self.matcher)(node) {
            self.items.push(item);
        }
    }
}

impl<T, F> IrVisitor for CollectingVisitor<T, F>
where
    F: for<'a> FnMut(IrNode<'a>) -> Option<T>,
{
    type Break = ();

    fn visit_constant(&mut self, constant: &Constant) -> ControlFlow<Self::Break> {
        self.maybe_collect(IrNode::Constant(constant));
        ControlFlow::Continue(())
    }

    fn visit_property_access(&mut self, access: &PropertyAccess) -> ControlFlow<Self::Break> {
        self.maybe_collect(IrNode::PropertyAccess(access));
        walk_property_access(self, access)
    }

    fn visit_elem_time_access(&mut self, access: &ElemTimeAccess) -> ControlFlow<Self::Break> {
        self.maybe_collect(IrNode::ElemTimeAccess(access));
        walk_elem_time_access(self, access)
    }

    fn visit_prop_time_access(&mut self, access: &PropTimeAccess) -> ControlFlow<Self::Break> {
        self.maybe_collect(IrNode::PropTimeAccess(access));
        walk_prop_time_access(self, access)
    }

    fn visit_period(&mut self, period: &Period) -> ControlFlow<Self::Break> {
        self.maybe_collect(IrNode::Period(period));
        walk_period(self, period)
    }

    fn visit_period_length(
        &mut self,
        length: &PeriodLengthExpression,
    ) -> ControlFlow<Self::Break> {
        self.maybe_collect(IrNode::PeriodLength(length));
        walk_period_length(self, length)
    }

    fn visit_element(&mut self, element: &GraphPatternElement) -> ControlFlow<Self::Break> {
        self.maybe_collect(IrNode::Element(element));
        walk_element(self, element)
    }
}
