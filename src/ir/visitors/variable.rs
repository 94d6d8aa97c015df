//! Element-reference collection visitor.

use std::collections::BTreeSet;
use std::ops::ControlFlow;

use smol_str::SmolStr;

use crate::ir::expression::QueryExpression;
use crate::ir::variable::GraphPatternElement;
use crate::ir::visitor::{IrVisitor, walk_element};

/// Collects which pattern elements an expression reads from.
///
/// Validators use this to check that every referenced element is declared
/// in the pattern (or bound by correlation from an enclosing scope).
/// Elements are recorded by unique identifier, since display names are
/// not unique across a query.
#[derive(Debug, Clone, Default)]
pub struct ElementCollector {
    identifiers: BTreeSet<SmolStr>,
    names: BTreeSet<SmolStr>,
}

impl ElementCollector {
    /// Creates a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the identifiers of elements referenced by an expression.
    pub fn collect_from_expression(expression: &QueryExpression) -> BTreeSet<SmolStr> {
        let mut collector = Self::new();
        let _ = expression.accept(&mut collector);
        collector.identifiers
    }

    /// Returns the unique identifiers of the referenced elements.
    pub fn identifiers(&self) -> &BTreeSet<SmolStr> {
        &self.identifiers
    }

    /// Returns the display names of the referenced elements.
    pub fn names(&self) -> &BTreeSet<SmolStr> {
        &self.names
    }

    /// Returns true if an element with this unique identifier was seen.
    pub fn contains(&self, unique_identifier: &str) -> bool {
        self.identifiers.contains(unique_identifier)
    }
}

impl IrVisitor for ElementCollector {
    type Break = ();

    fn visit_element(&mut self, element: &GraphPatternElement) -> ControlFlow<Self::Break> {
        self.identifiers.insert(element.unique_identifier().clone());
        self.names.insert(element.name());
        walk_element(self, element)
    }
}
