use crate::errors::ModelError;
use crate::treatment::validate_employees;

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn preferred_subset_of_allowed_passes() {
    let allowed = ids(&["emp-1", "emp-2", "emp-3"]);
    let preferred = ids(&["emp-3", "emp-1"]);
    assert!(validate_employees(&allowed, &preferred).is_ok());
}

#[test]
fn empty_preferred_always_passes() {
    assert!(validate_employees(&[], &[]).is_ok());
    assert!(validate_employees(&ids(&["emp-1"]), &[]).is_ok());
}

#[test]
fn first_missing_preferred_is_reported() {
    let allowed = ids(&["emp-1"]);
    let preferred = ids(&["emp-1", "emp-9", "emp-8"]);

    let err = validate_employees(&allowed, &preferred).unwrap_err();
    let ModelError::Validation(msg) = err;
    assert!(msg.contains("emp-9"), "unexpected message: {msg}");
}

#[test]
fn preferred_without_any_allowed_fails() {
    let err = validate_employees(&[], &ids(&["emp-1"])).unwrap_err();
    let ModelError::Validation(msg) = err;
    assert!(msg.contains("emp-1"));
}
