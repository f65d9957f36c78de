//! Tests for structural equality, satisfaction and union widening.

use hype_types::*;

// ============================================================================
// Helpers
// ============================================================================

fn object(table: &mut TypeTable, fields: &[(&str, TypeId)]) -> TypeId {
    let (id, members) = table.add_object();
    for (name, ty) in fields {
        members.add_member(Member::field(*name, *ty));
    }
    id
}

fn interface(table: &mut TypeTable, name: &str, fields: &[(&str, TypeId, bool)]) -> TypeId {
    let (id, members) = table.add_interface(name);
    for (field, ty, optional) in fields {
        members.add_member(Member::Field {
            name: field.to_string(),
            ty: *ty,
            optional: *optional,
        });
    }
    id
}

fn function(table: &mut TypeTable, parameters: &[TypeId], return_type: TypeId) -> TypeId {
    let parameters = parameters
        .iter()
        .enumerate()
        .map(|(i, ty)| Parameter {
            name: format!("p{}", i),
            optional: false,
            ty: *ty,
        })
        .collect();
    table.add_function(Function::signature(parameters, return_type)).1
}

fn method(table: &mut TypeTable, name: &str, return_type: TypeId) -> Member {
    let ty = function(table, &[], return_type);
    Member::method(name, ty)
}

// ============================================================================
// Reflexivity
// ============================================================================

#[test]
fn test_equals_is_reflexive() {
    let mut table = TypeTable::new();
    let (string, number, void) = (table.string_type, table.number_type, table.void_type);
    let obj = object(&mut table, &[("name", string)]);
    let union = table.widen(string, number);
    let fun = function(&mut table, &[string], void);

    for ty in [string, table.any_type, obj, union, fun] {
        assert!(table.equals(ty, ty));
        assert!(table.satisfies(ty, ty));
    }
}

#[test]
fn test_equals_implies_satisfies_both_ways() {
    let mut table = TypeTable::new();
    let (string, number) = (table.string_type, table.number_type);
    let a = object(&mut table, &[("name", string), ("age", number)]);
    let b = object(&mut table, &[("name", string), ("age", number)]);

    assert!(table.equals(a, b));
    assert!(table.satisfies(a, b));
    assert!(table.satisfies(b, a));
}

// ============================================================================
// Width subtyping
// ============================================================================

#[test]
fn test_wider_object_satisfies_narrower() {
    let mut table = TypeTable::new();
    let (string, number) = (table.string_type, table.number_type);
    let wide = object(&mut table, &[("name", string), ("extra", number)]);
    let narrow = object(&mut table, &[("name", string)]);

    assert!(table.satisfies(wide, narrow));
    assert!(!table.satisfies(narrow, wide));
    assert!(!table.equals(wide, narrow));
}

#[test]
fn test_field_types_must_match() {
    let mut table = TypeTable::new();
    let (string, number) = (table.string_type, table.number_type);
    let a = object(&mut table, &[("name", number)]);
    let b = object(&mut table, &[("name", string)]);
    assert!(!table.satisfies(a, b));
}

#[test]
fn test_field_satisfaction_direction() {
    let mut table = TypeTable::new();
    let (string, number) = (table.string_type, table.number_type);
    let union = table.widen(string, number);
    let narrow_field = object(&mut table, &[("value", string)]);
    let wide_field = object(&mut table, &[("value", union)]);

    assert!(table.satisfies(narrow_field, wide_field));
    assert!(!table.satisfies(wide_field, narrow_field));
}

#[test]
fn test_optional_target_field_may_be_missing() {
    let mut table = TypeTable::new();
    let string = table.string_type;
    let target = interface(
        &mut table,
        "Named",
        &[("name", string, false), ("nickname", string, true)],
    );
    let candidate = object(&mut table, &[("name", string)]);

    assert!(table.satisfies(candidate, target));
    assert!(!table.equals(candidate, target));
}

#[test]
fn test_object_satisfies_interface() {
    let mut table = TypeTable::new();
    let (string, number) = (table.string_type, table.number_type);
    let target = interface(&mut table, "Person", &[("name", string, false)]);
    let candidate = object(&mut table, &[("name", string), ("age", number)]);
    assert!(table.satisfies(candidate, target));
}

// ============================================================================
// Methods and functions
// ============================================================================

#[test]
fn test_method_return_types_relate() {
    let mut table = TypeTable::new();
    let (string, number) = (table.string_type, table.number_type);
    let (target, target_members) = table.add_interface("Greeter");
    let greet = method(&mut table, "greet", string);
    target_members.add_member(greet);

    let (good, good_members) = table.add_object();
    let greet = method(&mut table, "greet", string);
    good_members.add_member(greet);

    let (bad, bad_members) = table.add_object();
    let greet = method(&mut table, "greet", number);
    bad_members.add_member(greet);

    assert!(table.satisfies(good, target));
    assert!(!table.satisfies(bad, target));
}

#[test]
fn test_function_field_satisfies_method() {
    let mut table = TypeTable::new();
    let void = table.void_type;
    let (target, target_members) = table.add_interface("Greeter");
    let greet = method(&mut table, "greet", void);
    target_members.add_member(greet);

    let fun = function(&mut table, &[], void);
    let candidate = object(&mut table, &[("greet", fun)]);

    assert!(table.satisfies(candidate, target));
    assert!(!table.equals(candidate, target));
}

#[test]
fn test_function_parameters_are_contravariant() {
    let mut table = TypeTable::new();
    let (string, number, void) = (table.string_type, table.number_type, table.void_type);
    let union = table.widen(string, number);
    let takes_union = function(&mut table, &[union], void);
    let takes_string = function(&mut table, &[string], void);

    assert!(table.satisfies(takes_union, takes_string));
    assert!(!table.satisfies(takes_string, takes_union));
}

#[test]
fn test_function_with_fewer_parameters_satisfies() {
    let mut table = TypeTable::new();
    let (string, void) = (table.string_type, table.void_type);
    let none = function(&mut table, &[], void);
    let one = function(&mut table, &[string], void);

    assert!(table.satisfies(none, one));
    assert!(!table.satisfies(one, none));
    assert!(!table.equals(none, one));
}

// ============================================================================
// Unions
// ============================================================================

#[test]
fn test_value_satisfies_one_union_arm() {
    let mut table = TypeTable::new();
    let (string, number, void) = (table.string_type, table.number_type, table.void_type);
    let union = table.widen(string, number);
    assert!(table.satisfies(string, union));
    assert!(!table.satisfies(void, union));
}

#[test]
fn test_union_source_needs_every_arm() {
    let mut table = TypeTable::new();
    let (string, number) = (table.string_type, table.number_type);
    let union = table.widen(string, number);
    assert!(!table.satisfies(union, string));
    assert!(table.satisfies(union, table.any_type));
}

#[test]
fn test_union_equality_ignores_order() {
    let mut table = TypeTable::new();
    let (string, number, void) = (table.string_type, table.number_type, table.void_type);
    let a = table.widen(string, number);
    let b = table.widen(number, string);
    let c = table.widen(a, void);

    assert!(table.equals(a, b));
    assert!(!table.equals(a, c));
    assert!(table.satisfies(a, c));
}

#[test]
fn test_widen_with_two_types() {
    let mut table = TypeTable::new();
    let (string, number, void) = (table.string_type, table.number_type, table.void_type);
    let union = table.widen(string, number);
    let arms = table.arms(union);

    assert_eq!(arms.len(), 2);
    assert!(table.contains_all_type_specs(&[string], &arms));
    assert!(table.contains_all_type_specs(&[number], &arms));
    assert!(!table.contains_all_type_specs(&[void], &arms));
}

#[test]
fn test_widen_deduplicates_structurally() {
    let mut table = TypeTable::new();
    let (string, number) = (table.string_type, table.number_type);
    let a = object(&mut table, &[("name", string)]);
    let b = object(&mut table, &[("name", string)]);

    assert_eq!(table.widen(a, b), a);

    let union = table.widen(string, number);
    let again = table.widen(union, string);
    assert_eq!(table.arms(again).len(), 2);
}

#[test]
fn test_widen_keeps_distinct_placeholders() {
    let mut table = TypeTable::new();
    let a = table.add_placeholder("a");
    let b = table.add_placeholder("b");

    let union = table.widen(a, b);
    assert_eq!(table.arms(union), vec![a, b]);
    assert_eq!(table.widen(a, a), a);
}

// ============================================================================
// Redirects and recursion
// ============================================================================

#[test]
fn test_relations_follow_redirects() {
    let mut table = TypeTable::new();
    let string = table.string_type;
    let placeholder = table.add_placeholder("Later");
    assert!(!table.satisfies(string, placeholder));

    table.resolve_placeholder(placeholder, string).unwrap();
    assert!(table.equals(placeholder, string));
    assert!(table.satisfies(string, placeholder));
    assert_eq!(table.display(placeholder), "string");
}

#[test]
fn test_recursive_objects_compare_coinductively() {
    let mut table = TypeTable::new();
    let (a, a_members) = table.add_object();
    a_members.add_member(Member::field("next", a));
    let (b, b_members) = table.add_object();
    b_members.add_member(Member::field("next", b));

    assert!(table.equals(a, b));
    assert!(table.satisfies(a, b));
}
