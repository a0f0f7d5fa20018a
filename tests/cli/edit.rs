//! Tests for the interactive edit flow with scripted editors.

#![cfg(unix)]

use crate::support::*;

#[test]
fn test_edit_without_editor_fails() {
    let t = Test::with_config(CONFIG);

    let output = t.run(&["-project", "production", "-edit"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "Error: edit: EDITOR is not set");
}

#[test]
fn test_edit_unchanged_aborts() {
    let t = Test::with_config(CONFIG);

    let output = t.edit("true", "y\n");
    assert_success(&output);
    assert_stdout_contains(&output, "File contents unchanged, aborting!");
    assert!(!stdout(&output).contains("Upload [Y/n]?"));

    let calls = t.store_calls();
    assert!(calls.iter().all(|c| !c.contains("put-file")), "got {:?}", calls);

    let files = t.scratch_files();
    assert_eq!(files.len(), 2, "got {:?}", files);
    assert!(files[0].starts_with("production_"));
    assert_eq!(files[1], format!("{}.backup", files[0]));
}

#[test]
fn test_edit_confirmed_uploads_and_keeps_backup() {
    let t = Test::with_config(CONFIG);
    let editor = t.script("editor", APPENDING_EDITOR);

    let output = t.edit(editor.to_str().unwrap(), "y\n");
    assert_success(&output);
    assert_stdout_contains(&output, "Upload [Y/n]? ");
    assert_stdout_contains(&output, "Successfully uploaded app.toml");

    let puts: Vec<_> = t
        .store_calls()
        .into_iter()
        .filter(|c| c.contains("put-file"))
        .collect();
    assert_eq!(puts.len(), 1);

    let files = t.scratch_files();
    assert_eq!(files.len(), 1, "got {:?}", files);
    assert!(files[0].ends_with(".backup"));
    assert_eq!(std::fs::read_to_string(t.tmp().join(&files[0])).unwrap(), SECRET);
}

#[test]
fn test_edit_declined_keeps_files() {
    let t = Test::with_config(CONFIG);
    let editor = t.script("editor", APPENDING_EDITOR);

    let output = t.edit(editor.to_str().unwrap(), "n\n");
    assert_success(&output);
    assert_stdout_contains(&output, "Aborted!");
    assert!(t.store_calls().iter().all(|c| !c.contains("put-file")));

    let files = t.scratch_files();
    assert_eq!(files.len(), 2, "got {:?}", files);
    let scratch = std::fs::read_to_string(t.tmp().join(&files[0])).unwrap();
    assert_eq!(scratch, format!("{}pool = 5\n", SECRET));
}

#[test]
fn test_edit_editor_failure_keeps_backup_only() {
    let t = Test::with_config(CONFIG);

    let output = t.edit("false", "y\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "Error: edit: editor exited unsuccessfully");

    let files = t.scratch_files();
    assert_eq!(files.len(), 1, "got {:?}", files);
    assert!(files[0].ends_with(".backup"));
}

#[test]
fn test_edit_closed_stdin_fails_and_keeps_files() {
    let t = Test::with_config(CONFIG);
    let editor = t.script("editor", APPENDING_EDITOR);

    let output = t.edit(editor.to_str().unwrap(), "");
    assert_failure(&output);
    assert_stderr_contains(&output, "Error: edit: unexpected EOF");
    assert!(t.store_calls().iter().all(|c| !c.contains("put-file")));
    assert_eq!(t.scratch_files().len(), 2);
}
