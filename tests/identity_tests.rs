//! The structural equality / hash / printing agreement contract.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use pgq_ir::{
    ElemTimeAccess, ElementKind, ExpAsVar, GraphPatternElement, IrError, QueryExpression,
    TimeProperty, VariableKind,
};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn equal_time_accesses_over_equal_variables_agree_everywhere() {
    // Two independently constructed trees over contract-equal variables:
    // equal, equal hashes, identical canonical text.
    let build = || {
        QueryExpression::ElemTimeAccess(ElemTimeAccess::new(
            GraphPatternElement::with_unique_identifier(ElementKind::Vertex, "v", "v#0", false)
                .unwrap(),
            TimeProperty::TxFrom,
        ))
    };
    let a = build();
    let b = build();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn variable_kind_participates_in_identity() {
    let vertex_access = QueryExpression::ElemTimeAccess(ElemTimeAccess::new(
        GraphPatternElement::vertex("v", false).unwrap(),
        TimeProperty::TxTime,
    ));
    let edge_access = QueryExpression::ElemTimeAccess(ElemTimeAccess::new(
        GraphPatternElement::edge("v", false).unwrap(),
        TimeProperty::TxTime,
    ));
    // Same name, same attribute, different element kind.
    assert_ne!(vertex_access, edge_access);
    // But both print the same reference text; equality is finer than
    // printing for variables, never coarser.
    assert_eq!(vertex_access.to_string(), edge_access.to_string());
}

#[test]
fn casing_contract_for_all_time_properties() {
    for prop in TimeProperty::ALL {
        let access = ElemTimeAccess::new(GraphPatternElement::vertex("x", false).unwrap(), prop);
        let printed = access.to_string();
        assert_eq!(printed, format!("x.{prop}"));
        // Variable spelling preserved, attribute token upper-case.
        assert!(printed.starts_with("x."));
        assert_eq!(&printed[2..], prop.as_str());
    }
}

#[test]
fn rename_propagates_to_printing_but_identifier_pins_identity() {
    let element = GraphPatternElement::with_unique_identifier(
        ElementKind::Vertex,
        "anon_0",
        "v#3",
        true,
    )
    .unwrap();
    let access = ElemTimeAccess::new(element.clone(), TimeProperty::ValFrom);
    assert_eq!(access.to_string(), "anon_0.VAL_FROM");

    element.rename("t");
    assert_eq!(access.to_string(), "t.VAL_FROM");
    assert_eq!(element.unique_identifier(), "v#3");
}

#[test]
fn variable_kinds_are_reported() {
    assert_eq!(
        GraphPatternElement::vertex("v", false).unwrap().variable_kind(),
        VariableKind::Vertex
    );
    assert_eq!(
        GraphPatternElement::edge("e", false).unwrap().variable_kind(),
        VariableKind::Edge
    );
    assert_eq!(
        GraphPatternElement::path("p", false).unwrap().variable_kind(),
        VariableKind::Path
    );
    let column = ExpAsVar::new(
        QueryExpression::ElemTimeAccess(ElemTimeAccess::new(
            GraphPatternElement::vertex("v", false).unwrap(),
            TimeProperty::TxTime,
        )),
        "t",
        false,
    )
    .unwrap();
    assert_eq!(column.variable_kind(), VariableKind::ExpAsVar);
}

#[test]
fn defaulted_and_explicit_identifiers_enforce_the_same_rules() {
    // The defaulting path derives the identifier from the name, so an
    // empty name must be rejected there exactly as an empty identifier is
    // on the explicit path.
    assert_eq!(
        GraphPatternElement::vertex("", false).unwrap_err(),
        IrError::EmptyVariableName
    );
    assert_eq!(
        GraphPatternElement::with_unique_identifier(ElementKind::Vertex, "", "v#1", false)
            .unwrap_err(),
        IrError::EmptyVariableName
    );
    assert_eq!(
        GraphPatternElement::with_unique_identifier(ElementKind::Vertex, "v", "", false)
            .unwrap_err(),
        IrError::EmptyUniqueIdentifier
    );

    // Every successfully built element carries a non-empty identifier.
    let defaulted = GraphPatternElement::vertex("v", false).unwrap();
    assert!(!defaulted.unique_identifier().is_empty());
}

#[test]
fn exp_as_var_identity_includes_the_expression() {
    let exp = |prop| {
        QueryExpression::ElemTimeAccess(ElemTimeAccess::new(
            GraphPatternElement::vertex("v", false).unwrap(),
            prop,
        ))
    };
    let a = ExpAsVar::new(exp(TimeProperty::TxTime), "t", false).unwrap();
    let b = ExpAsVar::new(exp(TimeProperty::TxTime), "t", false).unwrap();
    let c = ExpAsVar::new(exp(TimeProperty::ValTime), "t", false).unwrap();

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_ne!(a, c);
}
