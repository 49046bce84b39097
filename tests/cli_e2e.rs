//! CLI end-to-end tests.
//!
//! These tests spawn the actual `mockgen` binary against temporary
//! workspaces and validate stdout, exit codes and the files left on disk.
//!
//! Exit code expectations:
//! - 0: Success
//! - 2: Invalid arguments (bad workspace)
//! - 3: Resolution error (missing or unparsable test file)

use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

const FOO: &str = "\
package a;

import java.util.List;
import java.util.Random;
import javax.inject.Inject;

public class Foo {
    public Foo() {}

    @Inject
    public Foo(Random random, List list) {}
}
";

const FOO_TEST: &str = "\
package a;

import org.junit.runner.RunWith;
import org.junit.runners.JUnit4;

@RunWith(JUnit4.class)
public class FooTest {
}
";

const TEST_FILE: &str = "src/test/java/a/FooTest.java";

/// Run mockgen with given arguments and return (stdout, stderr, exit_code).
fn run_mockgen(workspace: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_mockgen"))
        .arg("--workspace")
        .arg(workspace)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute mockgen");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Workspace with the subject under `src/main/java` and its test under
/// `src/test/java`.
fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/main/java/a/Foo.java", FOO);
    write(dir.path(), TEST_FILE, FOO_TEST);
    dir
}

// ============================================================================
// Generate
// ============================================================================

#[test]
fn json_output_describes_the_scaffold() {
    let dir = workspace();
    let (stdout, _stderr, exit_code) = run_mockgen(dir.path(), &[TEST_FILE, "--format", "json"]);
    assert_eq!(exit_code, 0, "stdout: {}", stdout);

    let json: Value = serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    assert_eq!(json["status"], "ok");
    assert_eq!(json["file"], TEST_FILE);
    assert_eq!(json["test_class"], "a.FooTest");
    assert_eq!(json["subject"], "a.Foo");
    assert_eq!(json["outcome"], "generated");
    assert_eq!(json["applied"], true);
    assert_eq!(json["setup_method"], true);

    let fields: Vec<&str> = json["inserted_fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["mRandom", "mList", "mUnderTest"]);
    assert_eq!(json["inserted_fields"][0]["type"], "java.util.Random");
    assert_eq!(json["inserted_fields"][2]["annotation"], "InjectMocks");

    let written = fs::read_to_string(dir.path().join(TEST_FILE)).unwrap();
    assert!(written.contains("import org.mockito.InjectMocks;\nimport org.mockito.Mock;\n"));
    assert!(written.contains("        mUnderTest = new Foo(mRandom, mList);\n"));
}

#[test]
fn second_run_reports_up_to_date() {
    let dir = workspace();
    let (_, _, first) = run_mockgen(dir.path(), &[TEST_FILE]);
    assert_eq!(first, 0);
    let after_first = fs::read_to_string(dir.path().join(TEST_FILE)).unwrap();

    let (stdout, _stderr, exit_code) = run_mockgen(dir.path(), &[TEST_FILE]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim_end(), format!("{}: up to date (up_to_date)", TEST_FILE));
    assert_eq!(fs::read_to_string(dir.path().join(TEST_FILE)).unwrap(), after_first);
}

#[test]
fn text_summary_lists_insertions() {
    let dir = workspace();
    let (stdout, _stderr, exit_code) = run_mockgen(dir.path(), &[TEST_FILE, "--dry-run"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with(&format!("would update {} (generated)", TEST_FILE)));
    assert!(stdout.contains("+ @Mock java.util.Random mRandom"));
    assert!(stdout.contains("+ @InjectMocks a.Foo mUnderTest"));
    assert!(stdout.contains("+ setUp()"));
    assert!(stdout.contains("+ import org.junit.Before"));
}

#[test]
fn dry_run_diff_leaves_file_untouched() {
    let dir = workspace();
    let (stdout, _stderr, exit_code) =
        run_mockgen(dir.path(), &[TEST_FILE, "--dry-run", "--format", "diff"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with(&format!("--- a/{}\n+++ b/{}\n", TEST_FILE, TEST_FILE)));
    assert!(stdout.contains("+    @InjectMocks\n"));
    assert_eq!(fs::read_to_string(dir.path().join(TEST_FILE)).unwrap(), FOO_TEST);
}

#[test]
fn library_subject_is_scaffolded_with_qualified_field() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "vendor/a/Foo.java", FOO);
    write(dir.path(), TEST_FILE, FOO_TEST);

    let (stdout, _stderr, exit_code) = run_mockgen(
        dir.path(),
        &[
            TEST_FILE,
            "--source-root",
            "src/test/java",
            "--library-root",
            "vendor",
            "--format",
            "json",
        ],
    );
    assert_eq!(exit_code, 0, "stdout: {}", stdout);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["outcome"], "generated");

    let written = fs::read_to_string(dir.path().join(TEST_FILE)).unwrap();
    assert!(written.contains("    private a.Foo mUnderTest;\n"));
}

#[test]
fn subject_without_injection_constructor() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "src/main/java/a/Foo.java",
        "package a;\n\npublic class Foo {\n    public Foo(String name) {}\n}\n",
    );
    write(dir.path(), TEST_FILE, FOO_TEST);

    let (stdout, _stderr, exit_code) = run_mockgen(dir.path(), &[TEST_FILE, "--format", "json"]);
    assert_eq!(exit_code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["outcome"], "no_injectable_constructor");
    assert_eq!(json["setup_method"], false);
    assert_eq!(json["inserted_fields"].as_array().unwrap().len(), 1);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn missing_test_file_returns_exit_3() {
    let dir = workspace();
    let (stdout, _stderr, exit_code) = run_mockgen(dir.path(), &["src/test/java/a/NopeTest.java"]);
    assert_eq!(exit_code, 3);

    let json: Value = serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"]["code"], 3);
    assert_eq!(json["error"]["details"]["path"], "src/test/java/a/NopeTest.java");
}

#[test]
fn unparsable_test_file_reports_location() {
    let dir = workspace();
    write(dir.path(), "src/test/java/a/BrokenTest.java", "package a;\n\nclass BrokenTest {\n");
    let (stdout, _stderr, exit_code) = run_mockgen(dir.path(), &["src/test/java/a/BrokenTest.java"]);
    assert_eq!(exit_code, 3);

    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["error"]["location"]["file"], "src/test/java/a/BrokenTest.java");
}

#[test]
fn bad_workspace_returns_exit_2() {
    let dir = workspace();
    let missing = dir.path().join("nope");
    let (stdout, _stderr, exit_code) = run_mockgen(&missing, &[TEST_FILE]);
    assert_eq!(exit_code, 2);

    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["error"]["code"], 2);
}
