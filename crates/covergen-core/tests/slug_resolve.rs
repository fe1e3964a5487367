use std::fs;

use covergen_core::slug::{claim, resolve, validate_segment, Plan};
use covergen_core::CoverError;

#[test]
fn absent_candidate_is_returned_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(resolve(dir.path(), "smith").unwrap(), "smith");
}

#[test]
fn taken_names_get_next_suffix() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("a")).unwrap();
    fs::create_dir(dir.path().join("a_2")).unwrap();

    assert_eq!(resolve(dir.path(), "a").unwrap(), "a_3");
}

#[test]
fn plain_files_count_as_taken() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a"), b"x").unwrap();
    assert_eq!(resolve(dir.path(), "a").unwrap(), "a_2");
}

#[test]
fn resolve_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    resolve(dir.path(), "a").unwrap();
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn claim_creates_first_free_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("a")).unwrap();

    let (name, path) = claim(dir.path(), "a").unwrap();
    assert_eq!(name, "a_2");
    assert!(path.is_dir());

    let (again, _) = claim(dir.path(), "a").unwrap();
    assert_eq!(again, "a_3");
}

#[test]
fn claim_fails_when_base_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = claim(&dir.path().join("missing"), "a").unwrap_err();
    assert!(matches!(err, CoverError::Io(_)));
}

#[test]
fn rejects_non_segments() {
    for bad in ["", ".", "..", "a/b", "a\\b", "x\0y"] {
        assert!(
            matches!(validate_segment(bad), Err(CoverError::InvalidSlug(_))),
            "accepted {bad:?}"
        );
    }
    let dir = tempfile::tempdir().unwrap();
    assert!(resolve(dir.path(), "../escape").is_err());
    assert!(claim(dir.path(), "../escape").is_err());
}

#[test]
fn accepts_ordinary_slugs() {
    for ok in ["smith", "uc-davis_econ", "a.b", "Ünïcode"] {
        validate_segment(ok).unwrap();
    }
}

#[test]
fn plan_treats_its_own_names_as_taken() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("a")).unwrap();

    let mut plan = Plan::new();
    assert_eq!(plan.resolve(dir.path(), "a").unwrap(), "a_2");
    assert_eq!(plan.resolve(dir.path(), "a_2").unwrap(), "a_2_2");
    assert_eq!(plan.resolve(dir.path(), "a").unwrap(), "a_3");
    assert_eq!(plan.len(), 3);
    // nothing was created
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn plan_skips_recorded_claims() {
    let dir = tempfile::tempdir().unwrap();
    let mut plan = Plan::new();
    plan.record("b");
    assert_eq!(plan.resolve(dir.path(), "b").unwrap(), "b_2");
}

#[test]
fn plan_rejects_bad_segments() {
    let dir = tempfile::tempdir().unwrap();
    let mut plan = Plan::new();
    assert!(matches!(
        plan.resolve(dir.path(), "../x"),
        Err(CoverError::InvalidSlug(_))
    ));
    assert!(plan.is_empty());
}
