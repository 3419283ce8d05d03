//! Tests for help handling and argument permissiveness.

use std::process::ExitCode;

use rstest::rstest;

use crate::config::PORT_VAR;
use crate::paths::ROOT_VAR;
use crate::tests::support::{
    FakeEnvironment, install_server_entry, run_scripted_os, run_with_recorder,
};

#[rstest]
#[case::long(&["--help"])]
#[case::short(&["-h"])]
#[case::after_another_flag(&["--verbose", "--help"])]
#[case::between_arguments(&["start", "-h", "--force"])]
#[case::with_trailing_junk(&["--help", "extra", "junk"])]
fn help_prints_usage_without_launching(#[case] arguments: &[&str]) {
    let env = FakeEnvironment::new();
    let (outcome, requests) = run_with_recorder(arguments, &env);
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(requests.is_empty());
    assert!(outcome.stdout.contains("OptimusHQ - Multi-Agent Platform"));
    assert!(outcome.stdout.contains("--help, -h"));
    assert!(outcome.stderr.is_empty());
}

#[test]
fn help_answers_even_when_the_environment_is_unusable() {
    let env = FakeEnvironment::new()
        .with_var(PORT_VAR, "not-a-number")
        .with_var(ROOT_VAR, "/nonexistent/optimushq");
    let (outcome, requests) = run_with_recorder(&["-h"], &env);
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(requests.is_empty());
    assert!(outcome.stderr.is_empty());
}

#[cfg(unix)]
#[test]
fn non_utf8_arguments_are_rejected_with_a_usage_error() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let args = vec![OsString::from("optimushq"), OsString::from_vec(vec![0xFF])];
    let mut launches = 0;
    let outcome = run_scripted_os(args, &FakeEnvironment::new(), |_request| {
        launches += 1;
        Ok(ExitCode::SUCCESS)
    });
    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert_eq!(launches, 0, "a rejected argv must never reach the launch stage");
    assert!(outcome.stdout.is_empty());
    assert!(!outcome.stderr.is_empty());
}

#[test]
fn unknown_arguments_do_not_prevent_a_launch() {
    let dir = tempfile::tempdir().expect("tempdir");
    install_server_entry(dir.path(), "// built\n");
    let env =
        FakeEnvironment::new().with_var(ROOT_VAR, dir.path().to_str().expect("utf8 root"));
    let (outcome, requests) = run_with_recorder(&["--port", "9999", "extra"], &env);
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(requests.len(), 1);
}
