use covergen_core::{normalize_path, normalize_reader, CoverError, NormalizeOptions};

#[test]
fn empty_identifier_reports_its_line() {
    let csv = "slug,school\nok,A\n   ,B\nlater,C\n";
    let err = normalize_reader(csv.as_bytes(), &NormalizeOptions::default()).unwrap_err();
    match err {
        CoverError::EmptyIdentifier { line, field } => {
            assert_eq!(line, 3);
            assert_eq!(field, "slug");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_identifier_fails_in_strict_mode_too() {
    let csv = "slug\n\"\"\n";
    let opts = NormalizeOptions::new().make_unique(false);
    let err = normalize_reader(csv.as_bytes(), &opts).unwrap_err();
    assert!(matches!(err, CoverError::EmptyIdentifier { line: 2, .. }));
}

#[test]
fn strict_duplicate_names_both_lines() {
    let csv = "slug\nsmith\njones\nsmith\n";
    let opts = NormalizeOptions::new().make_unique(false);
    let err = normalize_reader(csv.as_bytes(), &opts).unwrap_err();
    match &err {
        CoverError::DuplicateIdentifier { id, first_line, line } => {
            assert_eq!(id, "smith");
            assert_eq!(*first_line, 2);
            assert_eq!(*line, 4);
        }
        other => panic!("unexpected error: {other}"),
    }
    let msg = err.to_string();
    assert!(msg.contains("line 4") && msg.contains("line 2"), "{msg}");
}

#[test]
fn strict_mode_accepts_distinct_identifiers() {
    let csv = "slug\na\nb\nc\n";
    let opts = NormalizeOptions::new().make_unique(false);
    let recs = normalize_reader(csv.as_bytes(), &opts).unwrap();
    assert_eq!(recs.len(), 3);
}

#[test]
fn missing_identifier_column() {
    let csv = "name,school\nx,y\n";
    let err = normalize_reader(csv.as_bytes(), &NormalizeOptions::default()).unwrap_err();
    assert!(matches!(err, CoverError::MissingColumn { ref field } if field == "slug"));
}

#[test]
fn ragged_row_is_malformed() {
    let csv = "slug,school\na,b\nc\n";
    let err = normalize_reader(csv.as_bytes(), &NormalizeOptions::default()).unwrap_err();
    assert!(matches!(err, CoverError::MalformedRow { line: 3, .. }), "{err}");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err =
        normalize_path(&dir.path().join("nope.csv"), &NormalizeOptions::default()).unwrap_err();
    assert!(matches!(err, CoverError::Io(_)));
}
