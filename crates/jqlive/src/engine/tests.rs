//! Filter engine tests.

use std::path::Path;

use tempfile::tempdir;

use super::{is_valid, run};
use crate::error::InvocationFailure;
use crate::testing::jq_on_path;

#[cfg(unix)]
use crate::testing::fake_engine;

#[tokio::test]
async fn blank_filter_never_spawns() {
    let missing = Path::new("/definitely/not/here/jq");
    assert_eq!(
        run(missing, "{}", "   ").await,
        Err(InvocationFailure::EmptyFilter)
    );
}

#[tokio::test]
async fn missing_executable_is_spawn_failure() {
    let dir = tempdir().expect("tempdir");
    let failure = run(&dir.path().join("nope"), "{}", ".")
        .await
        .expect_err("spawn should fail");
    assert!(failure.is_missing_executable(), "got {failure:?}");
}

#[cfg(unix)]
#[tokio::test]
async fn stdout_is_returned_verbatim() {
    let dir = tempdir().expect("tempdir");
    let engine = fake_engine(dir.path(), "echo-engine", "cat");

    let output = run(&engine, "{\"a\": 1}\n", ".").await.expect("run");
    assert_eq!(output, "{\"a\": 1}\n");
}

#[cfg(unix)]
#[tokio::test]
async fn filter_is_the_sole_argument() {
    let dir = tempdir().expect("tempdir");
    let engine = fake_engine(
        dir.path(),
        "args-engine",
        "cat > /dev/null\nprintf '%s|%s' \"$#\" \"$1\"",
    );

    let output = run(&engine, "{}", ".foo | keys").await.expect("run");
    assert_eq!(output, "1|.foo | keys");
}

#[cfg(unix)]
#[tokio::test]
async fn nonzero_exit_discards_partial_output() {
    let dir = tempdir().expect("tempdir");
    let engine = fake_engine(
        dir.path(),
        "failing-engine",
        "cat > /dev/null\necho partial\necho 'syntax error' >&2\nexit 5",
    );

    let failure = run(&engine, "{}", "nonsense(((").await.expect_err("failure");
    assert_eq!(
        failure,
        InvocationFailure::Exit {
            code: Some(5),
            stderr: "syntax error".to_string(),
        }
    );
}

#[cfg(unix)]
#[tokio::test]
async fn large_documents_do_not_deadlock() {
    let dir = tempdir().expect("tempdir");
    let engine = fake_engine(dir.path(), "echo-engine", "cat");
    let document = format!("[{}1]", "1,".repeat(512 * 1024));

    let output = run(&engine, &document, ".").await.expect("run");
    assert_eq!(output.len(), document.len());
}

#[cfg(unix)]
#[tokio::test]
async fn engine_that_ignores_stdin_still_succeeds() {
    let dir = tempdir().expect("tempdir");
    let engine = fake_engine(dir.path(), "quiet-engine", "printf 'null\\n'");
    let document = "x".repeat(1024 * 1024);

    let output = run(&engine, &document, ".").await.expect("run");
    assert_eq!(output, "null\n");
}

#[tokio::test]
async fn empty_content_is_invalid_without_spawning() {
    assert!(!is_valid(Path::new("/definitely/not/here/jq"), "").await);
}

#[tokio::test]
async fn missing_engine_makes_content_invalid() {
    let dir = tempdir().expect("tempdir");
    assert!(!is_valid(&dir.path().join("nope"), "{}").await);
}

#[cfg(unix)]
#[tokio::test]
async fn document_check_follows_exit_status() {
    let dir = tempdir().expect("tempdir");
    let accepting = fake_engine(dir.path(), "accepting", "cat > /dev/null");
    let rejecting = fake_engine(dir.path(), "rejecting", "cat > /dev/null\nexit 2");
    let identity_only = fake_engine(
        dir.path(),
        "identity-only",
        "cat > /dev/null\n[ \"$1\" = \".\" ] || exit 9",
    );

    assert!(is_valid(&accepting, "{}").await, "empty output counts as success");
    assert!(!is_valid(&rejecting, "{}").await);
    assert!(is_valid(&identity_only, "{}").await);
}

#[tokio::test]
async fn jq_validates_documents() {
    let Some(jq) = jq_on_path() else {
        return;
    };
    assert!(is_valid(&jq, "{}").await);
    assert!(is_valid(&jq, "[1, 2, 3]").await);
    assert!(!is_valid(&jq, "not json").await);
    assert!(!is_valid(&jq, "").await);
}

#[tokio::test]
async fn jq_output_revalidates() {
    let Some(jq) = jq_on_path() else {
        return;
    };
    let document = r#"{"a":{"b":[1,2]},"c":"x"}"#;

    for filter in [".", ".a", ".a.b", "keys", "length", ".c"] {
        let output = run(&jq, document, filter).await.expect("run");
        assert!(
            is_valid(&jq, &output).await,
            "output of {filter} should be valid input: {output:?}"
        );
    }
}

#[tokio::test]
async fn jq_rejects_broken_filter() {
    let Some(jq) = jq_on_path() else {
        return;
    };
    let failure = run(&jq, "{}", "nonsense(((").await.expect_err("syntax error");
    assert!(matches!(failure, InvocationFailure::Exit { .. }));
}
