use std::fs;
use std::path::{Path, PathBuf};

use editor::error::{EXIT_IO, EXIT_PARSE};
use editor::{EditError, EditRequest, MatchMode, Outcome, WriteMode, run};

const FIXTURE: &str = include_str!("fixtures/versions.tf");
const EXPECTED: &str = include_str!("fixtures/versions.expected.tf");

fn write_temp(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("main.tf");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn updates_fixture_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(dir.path(), FIXTURE);

    let outcome = run(&EditRequest::new(&path, "code_version", "v2.55.4")).expect("run failed");

    assert!(matches!(outcome, Outcome::Updated { ref matches } if matches.len() == 1));
    assert_eq!(fs::read_to_string(&path).unwrap(), EXPECTED);
}

#[test]
fn updates_fixture_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(dir.path(), FIXTURE);

    let request = EditRequest::new(&path, "code_version", "v2.55.4")
        .with_write_mode(WriteMode::InPlace);
    run(&request).expect("run failed");

    assert_eq!(fs::read_to_string(&path).unwrap(), EXPECTED);
}

#[test]
fn shorter_value_leaves_no_trailing_bytes() {
    for mode in [WriteMode::Atomic, WriteMode::InPlace] {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(dir.path(), FIXTURE);

        let request = EditRequest::new(&path, "code_version", "1").with_write_mode(mode);
        run(&request).expect("run failed");

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            FIXTURE.replace("\"1.1.1.1\"", "\"1\""),
            "write mode {:?}",
            mode
        );
    }
}

#[test]
fn missing_local_is_not_an_error_and_file_is_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(dir.path(), FIXTURE);
    let before = fs::metadata(&path).unwrap().modified().unwrap();

    let outcome = run(&EditRequest::new(&path, "missing_version", "x")).expect("run failed");

    assert_eq!(outcome, Outcome::NotFound);
    assert_eq!(fs::read_to_string(&path).unwrap(), FIXTURE);
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
}

#[test]
fn output_attribute_names_do_not_match() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(dir.path(), FIXTURE);

    let outcome = run(&EditRequest::new(&path, "value", "x")).expect("run failed");

    assert_eq!(outcome, Outcome::NotFound);
    assert_eq!(fs::read_to_string(&path).unwrap(), FIXTURE);
}

#[test]
fn match_mode_controls_duplicate_locals() {
    let src = "locals {\n  v = 1\n}\n\nlocals {\n  v = 2\n}\n";

    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(dir.path(), src);
    let outcome = run(&EditRequest::new(&path, "v", "x")).unwrap();
    assert!(matches!(outcome, Outcome::Updated { ref matches } if matches.len() == 2));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "locals {\n  v = \"x\"\n}\n\nlocals {\n  v = \"x\"\n}\n"
    );

    let path = write_temp(dir.path(), src);
    let request = EditRequest::new(&path, "v", "x").with_match_mode(MatchMode::First);
    let outcome = run(&request).unwrap();
    assert!(matches!(outcome, Outcome::Updated { ref matches } if matches.len() == 1));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "locals {\n  v = \"x\"\n}\n\nlocals {\n  v = 2\n}\n"
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.tf");

    let err = run(&EditRequest::new(&path, "v", "x")).unwrap_err();

    assert!(matches!(err, EditError::Io { .. }));
    assert_eq!(err.exit_code(), EXIT_IO);
    assert!(err.to_string().starts_with("cannot open"), "{}", err);
    assert!(!path.exists());
}

#[test]
fn invalid_syntax_is_a_parse_error_and_file_is_untouched() {
    let src = "locals {\n  v = \"1\"\n";
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(dir.path(), src);

    let err = run(&EditRequest::new(&path, "v", "x")).unwrap_err();

    match &err {
        EditError::Parse {
            errors,
            source_text,
            ..
        } => {
            assert!(!errors.is_empty());
            assert_eq!(source_text, src);
        }
        other => panic!("expected parse error, got {:?}", other),
    }
    assert_eq!(err.exit_code(), EXIT_PARSE);
    assert_eq!(fs::read_to_string(&path).unwrap(), src);
}

#[cfg(unix)]
#[test]
fn symlinked_file_updates_target_and_keeps_link() {
    for mode in [WriteMode::Atomic, WriteMode::InPlace] {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("common.tf");
        fs::write(&target, "locals {\n  v = \"1\"\n}\n").unwrap();
        let link = dir.path().join("main.tf");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let request = EditRequest::new(&link, "v", "2").with_write_mode(mode);
        run(&request).expect("run failed");

        assert!(
            fs::symlink_metadata(&link).unwrap().file_type().is_symlink(),
            "write mode {:?}",
            mode
        );
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "locals {\n  v = \"2\"\n}\n",
            "write mode {:?}",
            mode
        );
    }
}

#[test]
fn crlf_file_keeps_its_line_endings() {
    let src = FIXTURE.replace('\n', "\r\n");
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(dir.path(), &src);

    run(&EditRequest::new(&path, "code_version", "v2.55.4")).expect("run failed");

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        EXPECTED.replace('\n', "\r\n")
    );
}
