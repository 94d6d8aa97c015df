//! Reusable visitor implementations.

pub mod collecting;
pub mod variable;

pub use collecting::{CollectingVisitor, IrNode};
pub use variable::ElementCollector;
