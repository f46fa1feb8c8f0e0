//! Tests for the validation phase of CommandBridge
//!
//! Every rejected call must leave the runner untouched.

mod common;

use rstest::rstest;
use tempfile::TempDir;

use common::{mock_bridge, MockRunner};
use corebrain_bridge::{BridgeError, BridgeResult, CommandBridge, ValidationError};

type Call = fn(&CommandBridge, &str) -> BridgeResult<String>;

fn call_set_token(b: &CommandBridge, v: &str) -> BridgeResult<String> {
    b.set_token(v)
}

fn call_set_api_key(b: &CommandBridge, v: &str) -> BridgeResult<String> {
    b.set_api_key(v)
}

fn call_login_with_token(b: &CommandBridge, v: &str) -> BridgeResult<String> {
    b.login_with_token(v)
}

fn call_login(b: &CommandBridge, v: &str) -> BridgeResult<String> {
    b.login(v, "pw")
}

fn call_login_2(b: &CommandBridge, v: &str) -> BridgeResult<String> {
    b.login("alice", v)
}

fn call_task_status(b: &CommandBridge, v: &str) -> BridgeResult<String> {
    b.task_status(v, None, None)
}

fn call_api_url(b: &CommandBridge, v: &str) -> BridgeResult<String> {
    b.api_url(v)
}

fn call_sso_url(b: &CommandBridge, v: &str) -> BridgeResult<String> {
    b.sso_url(v)
}

fn call_validate_config_file(b: &CommandBridge, v: &str) -> BridgeResult<String> {
    b.validate_config_file(v)
}

fn call_export_config_to(b: &CommandBridge, v: &str) -> BridgeResult<String> {
    b.export_config_to(v, None, false)
}

fn call_test_auth(b: &CommandBridge, v: &str) -> BridgeResult<String> {
    b.test_auth(Some(v), None)
}

fn call_check_status(b: &CommandBridge, v: &str) -> BridgeResult<String> {
    b.check_status(Some(v), Some("tok"))
}

fn call_task_status_2(b: &CommandBridge, v: &str) -> BridgeResult<String> {
    b.task_status("t-1", Some(v), None)
}

fn call_validate_config(b: &CommandBridge, v: &str) -> BridgeResult<String> {
    b.validate_config(Some(v), None)
}

fn call_test_connection(b: &CommandBridge, v: &str) -> BridgeResult<String> {
    b.test_connection(Some(v), None, true)
}

fn assert_validation(result: BridgeResult<String>) -> ValidationError {
    match result {
        Err(BridgeError::Validation(e)) => e,
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ============================================================
// Required string parameters
// ============================================================

#[rstest]
#[case::set_token(call_set_token as Call, "token")]
#[case::set_api_key(call_set_api_key as Call, "api_key")]
#[case::login_with_token(call_login_with_token as Call, "token")]
#[case::login_username(call_login as Call, "username")]
#[case::login_password(call_login_2 as Call, "password")]
#[case::task_status(call_task_status as Call, "task_id")]
#[case::api_url(call_api_url as Call, "url")]
#[case::sso_url(call_sso_url as Call, "url")]
#[case::validate_config_file(call_validate_config_file as Call, "path")]
#[case::export_config_to(call_export_config_to as Call, "output_directory")]
fn given_blank_required_param_when_calling_then_rejected_without_spawn(
    #[case] call: Call,
    #[case] param: &str,
    #[values("", " ", "\t \n")] value: &str,
) {
    // Arrange
    let (bridge, runner) = mock_bridge(MockRunner::ok("unused"));

    // Act
    let err = assert_validation(call(&bridge, value));

    // Assert
    assert_eq!(err.param(), Some(param));
    assert!(err.to_string().contains("cannot be empty or whitespace"));
    assert_eq!(runner.call_count(), 0);
}

#[test]
fn given_both_login_params_blank_when_login_then_username_reported_first() {
    let (bridge, runner) = mock_bridge(MockRunner::ok(""));

    let err = assert_validation(bridge.login("", ""));

    assert_eq!(err.param(), Some("username"));
    assert_eq!(runner.call_count(), 0);
}

// ============================================================
// URL parameters
// ============================================================

#[rstest]
fn given_invalid_url_when_setting_endpoint_then_rejected_without_spawn(
    #[values(
        "ftp://files.example.com",
        "file:///etc/hosts",
        "ws://example.com/socket",
        "example.com",
        "/api/v1",
        "http//broken",
        "not a url"
    )]
    url: &str,
    #[values(call_api_url as Call, call_sso_url as Call)] call: Call,
) {
    let (bridge, runner) = mock_bridge(MockRunner::ok(""));

    let err = assert_validation(call(&bridge, url));

    assert!(matches!(err, ValidationError::InvalidUrl { .. }), "{url}: {err:?}");
    assert!(err.to_string().contains("invalid URL format"));
    assert_eq!(runner.call_count(), 0);
}

#[rstest]
#[case::test_auth(call_test_auth as Call)]
#[case::check_status(call_check_status as Call)]
#[case::task_status(call_task_status_2 as Call)]
#[case::validate_config(call_validate_config as Call)]
#[case::test_connection(call_test_connection as Call)]
fn given_invalid_optional_api_url_when_calling_then_rejected_without_spawn(#[case] call: Call) {
    let (bridge, runner) = mock_bridge(MockRunner::ok(""));

    let err = assert_validation(call(&bridge, "gopher://old.example.com"));

    assert!(matches!(err, ValidationError::InvalidUrl { .. }));
    assert_eq!(runner.call_count(), 0);
}

// ============================================================
// Filesystem preconditions
// ============================================================

#[test]
fn given_missing_file_when_validate_config_file_then_file_not_found() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.json");
    let (bridge, runner) = mock_bridge(MockRunner::ok(""));

    // Act
    let err = assert_validation(bridge.validate_config_file(missing.to_str().unwrap()));

    // Assert
    assert_eq!(err, ValidationError::FileNotFound(missing));
    assert_eq!(runner.call_count(), 0);
}

#[test]
fn given_directory_when_validate_config_file_then_file_not_found() {
    let temp = TempDir::new().unwrap();
    let (bridge, runner) = mock_bridge(MockRunner::ok(""));

    let err = assert_validation(bridge.validate_config_file(temp.path().to_str().unwrap()));

    assert!(matches!(err, ValidationError::FileNotFound(_)));
    assert_eq!(runner.call_count(), 0);
}

#[test]
fn given_missing_directory_when_export_config_to_then_directory_not_found() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("out");
    let (bridge, runner) = mock_bridge(MockRunner::ok(""));

    let err = assert_validation(bridge.export_config_to(missing.to_str().unwrap(), None, true));

    assert_eq!(err, ValidationError::DirectoryNotFound(missing));
    assert_eq!(runner.call_count(), 0);
}

#[test]
fn given_file_instead_of_directory_when_export_config_to_then_directory_not_found() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("out.txt");
    std::fs::write(&file, "x").unwrap();
    let (bridge, runner) = mock_bridge(MockRunner::ok(""));

    let err = assert_validation(bridge.export_config_to(file.to_str().unwrap(), Some("cfg"), false));

    assert!(matches!(err, ValidationError::DirectoryNotFound(_)));
    assert_eq!(runner.call_count(), 0);
}

// ============================================================
// Raw pass-through
// ============================================================

#[rstest]
#[case("")]
#[case("   ")]
fn given_blank_raw_line_when_execute_raw_then_rejected(#[case] line: &str) {
    let (bridge, runner) = mock_bridge(MockRunner::ok(""));

    let err = assert_validation(bridge.execute_raw(line));

    assert_eq!(err.param(), Some("arguments"));
    assert_eq!(runner.call_count(), 0);
}

#[test]
fn given_unterminated_quote_when_execute_command_then_rejected() {
    let (bridge, runner) = mock_bridge(MockRunner::ok(""));

    let err = assert_validation(bridge.execute_command(r#"--login --token "abc"#));

    assert!(matches!(err, ValidationError::UnterminatedQuote(_)));
    assert_eq!(runner.call_count(), 0);
}
