//! Variable identity for graph-pattern elements and projected expressions.
//!
//! A query can reference four kinds of things by name: vertices, edges,
//! paths, and projected expressions (`expr AS name`). The first three are
//! pattern elements shared between the pattern that declares them and
//! every expression that reads from them, so they live behind an
//! [`ElementRef`] handle; the last owns its expression outright.
//!
//! Identity is structural, never pointer-based: two independently built
//! variables with the same kind, name, unique identifier, and anonymity
//! compare equal and hash equal, which is what lets downstream passes key
//! maps by variable.

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use smol_str::SmolStr;

use crate::diag::IrError;
use crate::ir::expression::QueryExpression;

/// The kind tag shared by everything a query can reference by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Vertex,
    Edge,
    Path,
    ExpAsVar,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariableKind::Vertex => "VERTEX",
            VariableKind::Edge => "EDGE",
            VariableKind::Path => "PATH",
            VariableKind::ExpAsVar => "EXP_AS_VAR",
        };
        f.write_str(name)
    }
}

/// The kind of a graph-pattern element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Vertex,
    Edge,
    Path,
}

impl ElementKind {
    /// Widens this element kind into the variable-kind tag.
    pub const fn variable_kind(self) -> VariableKind {
        match self {
            ElementKind::Vertex => VariableKind::Vertex,
            ElementKind::Edge => VariableKind::Edge,
            ElementKind::Path => VariableKind::Path,
        }
    }
}

/// Shared handle to a pattern element.
///
/// The pattern owns its elements through these handles; property and time
/// accesses hold clones of the same handle so that a rename performed on
/// the pattern is observed by every expression reading the element.
pub type ElementRef = Rc<GraphPatternElement>;

/// A vertex, edge, or path variable declared by a graph pattern.
///
/// The display name is mutable (renaming passes assign synthesized names
/// to anonymous elements); the unique identifier is assigned at
/// construction and never recomputed from the name. The correlation slot
/// is a weak back-reference to a variable bound in an enclosing query
/// scope and never extends that variable's lifetime.
#[derive(Debug)]
pub struct GraphPatternElement {
    kind: ElementKind,
    name: RefCell<SmolStr>,
    unique_identifier: SmolStr,
    anonymous: bool,
    correlation: RefCell<Option<Weak<GraphPatternElement>>>,
}

impl GraphPatternElement {
    /// Creates an element whose unique identifier defaults to its name.
    ///
    /// The caller guarantees cross-query uniqueness of identifiers; when
    /// names alone cannot provide that, use
    /// [`with_unique_identifier`](Self::with_unique_identifier).
    ///
    /// # Errors
    ///
    /// Returns [`IrError::EmptyVariableName`] when `name` is empty; even
    /// anonymous elements carry a synthesized name, and the identifier
    /// defaulted from the name must itself be non-empty.
    pub fn new(
        kind: ElementKind,
        name: impl Into<SmolStr>,
        anonymous: bool,
    ) -> Result<ElementRef, IrError> {
        let name = name.into();
        if name.is_empty() {
            return Err(IrError::EmptyVariableName);
        }
        Ok(Rc::new(Self {
            kind,
            unique_identifier: name.clone(),
            name: RefCell::new(name),
            anonymous,
            correlation: RefCell::new(None),
        }))
    }

    /// Creates an element with an explicitly assigned unique identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::EmptyVariableName`] when `name` is empty and
    /// [`IrError::EmptyUniqueIdentifier`] when `unique_identifier` is.
    pub fn with_unique_identifier(
        kind: ElementKind,
        name: impl Into<SmolStr>,
        unique_identifier: impl Into<SmolStr>,
        anonymous: bool,
    ) -> Result<ElementRef, IrError> {
        let name = name.into();
        if name.is_empty() {
            return Err(IrError::EmptyVariableName);
        }
        let unique_identifier = unique_identifier.into();
        if unique_identifier.is_empty() {
            return Err(IrError::EmptyUniqueIdentifier);
        }
        Ok(Rc::new(Self {
            kind,
            name: RefCell::new(name),
            unique_identifier,
            anonymous,
            correlation: RefCell::new(None),
        }))
    }

    /// Creates a vertex element.
    pub fn vertex(name: impl Into<SmolStr>, anonymous: bool) -> Result<ElementRef, IrError> {
        Self::new(ElementKind::Vertex, name, anonymous)
    }

    /// Creates an edge element.
    pub fn edge(name: impl Into<SmolStr>, anonymous: bool) -> Result<ElementRef, IrError> {
        Self::new(ElementKind::Edge, name, anonymous)
    }

    /// Creates a path element.
    pub fn path(name: impl Into<SmolStr>, anonymous: bool) -> Result<ElementRef, IrError> {
        Self::new(ElementKind::Path, name, anonymous)
    }

    /// Returns the element kind.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Returns the variable-kind tag.
    pub fn variable_kind(&self) -> VariableKind {
        self.kind.variable_kind()
    }

    /// Returns the current display name.
    pub fn name(&self) -> SmolStr {
        self.name.borrow().clone()
    }

    /// Updates the display name. The unique identifier is unaffected.
    pub fn rename(&self, new_name: impl Into<SmolStr>) {
        *self.name.borrow_mut() = new_name.into();
    }

    /// Returns the query-wide unique identifier.
    pub fn unique_identifier(&self) -> &SmolStr {
        &self.unique_identifier
    }

    /// Returns true if the query did not supply a name for this element.
    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    /// Returns the correlated outer-scope variable, if this element is
    /// bound by correlation into a nested pattern and the outer variable
    /// is still alive.
    pub fn correlation_variable(&self) -> Option<ElementRef> {
        self.correlation
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
    }

    /// Binds this element to a variable from an enclosing query scope.
    pub fn set_correlation_variable(&self, outer: &ElementRef) {
        *self.correlation.borrow_mut() = Some(Rc::downgrade(outer));
    }

    /// Clears the correlation binding.
    pub fn clear_correlation_variable(&self) {
        *self.correlation.borrow_mut() = None;
    }
}

// Identity is (kind, name, unique identifier, anonymous). The correlation
// slot is deliberately excluded: it is a scoping fact, not identity.
impl PartialEq for GraphPatternElement {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.anonymous == other.anonymous
            && *self.name.borrow() == *other.name.borrow()
            && self.unique_identifier == other.unique_identifier
    }
}

impl Eq for GraphPatternElement {}

impl Hash for GraphPatternElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.anonymous.hash(state);
        self.name.borrow().hash(state);
        self.unique_identifier.hash(state);
    }
}

impl fmt::Display for GraphPatternElement {
    /// Renders the element in pattern position: `(v)` for vertices,
    /// `-[e]->` for edges, the bare name for paths. Anonymous elements
    /// render with the name omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.anonymous) {
            (ElementKind::Vertex, true) => write!(f, "()"),
            (ElementKind::Vertex, false) => write!(f, "({})", self.name.borrow()),
            (ElementKind::Edge, true) => write!(f, "-[]->"),
            (ElementKind::Edge, false) => write!(f, "-[{}]->", self.name.borrow()),
            (ElementKind::Path, _) => write!(f, "{}", self.name.borrow()),
        }
    }
}

/// A projected expression exposed under a name (`expr AS name`).
///
/// Built for every projected column, whether or not the user supplied an
/// explicit alias; `anonymous` is true when the alias was synthesized.
/// The expression slot is the one rebindable point of the IR: rewriting
/// passes may swap the projected expression while keeping the column
/// identity stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpAsVar {
    name: SmolStr,
    unique_identifier: SmolStr,
    anonymous: bool,
    exp: QueryExpression,
}

impl ExpAsVar {
    /// Creates a projected column whose unique identifier defaults to its
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::EmptyVariableName`] when `name` is empty.
    pub fn new(
        exp: QueryExpression,
        name: impl Into<SmolStr>,
        anonymous: bool,
    ) -> Result<Self, IrError> {
        let name = name.into();
        if name.is_empty() {
            return Err(IrError::EmptyVariableName);
        }
        Ok(Self {
            unique_identifier: name.clone(),
            name,
            anonymous,
            exp,
        })
    }

    /// Creates a projected column with an explicit unique identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::EmptyVariableName`] when `name` is empty and
    /// [`IrError::EmptyUniqueIdentifier`] when `unique_identifier` is.
    pub fn with_unique_identifier(
        exp: QueryExpression,
        name: impl Into<SmolStr>,
        unique_identifier: impl Into<SmolStr>,
        anonymous: bool,
    ) -> Result<Self, IrError> {
        let name = name.into();
        if name.is_empty() {
            return Err(IrError::EmptyVariableName);
        }
        let unique_identifier = unique_identifier.into();
        if unique_identifier.is_empty() {
            return Err(IrError::EmptyUniqueIdentifier);
        }
        Ok(Self {
            name,
            unique_identifier,
            anonymous,
            exp,
        })
    }

    /// Returns the variable-kind tag.
    pub fn variable_kind(&self) -> VariableKind {
        VariableKind::ExpAsVar
    }

    /// Returns the name under which the expression is exposed.
    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    /// Updates the display name. The unique identifier is unaffected.
    pub fn rename(&mut self, new_name: impl Into<SmolStr>) {
        self.name = new_name.into();
    }

    /// Returns the query-wide unique identifier.
    pub fn unique_identifier(&self) -> &SmolStr {
        &self.unique_identifier
    }

    /// Returns true if the query supplied no explicit alias.
    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    /// Returns the projected expression.
    pub fn exp(&self) -> &QueryExpression {
        &self.exp
    }

    /// Rebinds the projected expression.
    pub fn set_exp(&mut self, exp: QueryExpression) {
        self.exp = exp;
    }
}
