use std::net::TcpListener;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_binary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_price-history"))
        .args(args)
        .env_remove("PRICECHARTING_EMAIL")
        .env_remove("PRICECHARTING_PASSWORD")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

#[test]
fn test_network_error_is_logged_and_exits_zero() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/game/a/b", listener.local_addr().unwrap());
    drop(listener);
    let tmp = TempDir::new().unwrap();

    let output = run_binary(&["-u", &url, "-o", tmp.path().to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ERROR"), "stdout: {}", stdout);
    assert!(stdout.contains("extracting price history from"));
    assert!(output.stderr.is_empty());
}

#[test]
fn test_invalid_url_is_logged_and_exits_zero() {
    let tmp = TempDir::new().unwrap();

    let output = run_binary(&["-u", "not a url", "-o", tmp.path().to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("resolving target"), "stdout: {}", stdout);
}
