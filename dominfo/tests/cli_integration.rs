// dominfo/tests/cli_integration.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use tempfile::NamedTempFile;

const ROOT_RESPONSE: &[u8] = b"% IANA WHOIS server\n\ndomain:       COM\n\nwhois:        127.0.0.1\n\nstatus:       ACTIVE\n";

const RECORD_RESPONSE: &[u8] = b"Domain Name: EXAMPLE.COM\r\n\
Registrar: Example Registrar\r\n\
Creation Date: 1995-08-14T04:00:00Z\r\n\
Name Server: A.IANA-SERVERS.NET\r\n\
Name Server: B.IANA-SERVERS.NET\r\n";

/// Helper to serve canned WHOIS responses, one per connection
fn spawn_whois_server(responses: Vec<&'static [u8]>) -> (u16, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test listener");
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        for response in responses {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream);
            let mut line = String::new();
            reader.read_line(&mut line).expect("read query");
            reader.into_inner().write_all(response).expect("write response");
        }
    });

    (port, handle)
}

/// Command with config discovery and environment isolated from the host
fn dominfo() -> Command {
    let mut cmd = Command::cargo_bin("dominfo").unwrap();
    let home = std::env::temp_dir().join("dominfo-cli-test-home");
    cmd.env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("DOMINFO_ROOT_SERVER")
        .env_remove("DOMINFO_TIMEOUT")
        .env_remove("DOMINFO_PORT")
        .env_remove("DOMINFO_JSON")
        .env_remove("DOMINFO_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_shows_flags() {
    dominfo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--root-server"))
        .stdout(predicate::str::contains("--iana-server"))
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--raw"))
        .stdout(predicate::str::contains("--timeout"));
}

#[test]
fn test_missing_domain_is_usage_error() {
    dominfo().assert().failure();
}

#[test]
fn test_json_output() {
    let (port, server) = spawn_whois_server(vec![ROOT_RESPONSE, RECORD_RESPONSE]);

    let output = dominfo()
        .args(["example.com", "-s", "127.0.0.1", "--port", &port.to_string(), "--json"])
        .output()
        .unwrap();
    server.join().unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 11);
    assert_eq!(obj["domain_name"], "EXAMPLE.COM");
    assert_eq!(obj["registrar"], "Example Registrar");
    assert_eq!(obj["creation_date"], "1995-08-14T04:00:00+00:00");
    assert_eq!(
        obj["name_server"],
        serde_json::json!(["A.IANA-SERVERS.NET", "B.IANA-SERVERS.NET"])
    );
    assert!(obj["dnssec"].is_null());
    assert!(obj["registry_expiry_date"].is_null());
}

#[test]
fn test_text_output() {
    let (port, server) = spawn_whois_server(vec![ROOT_RESPONSE, RECORD_RESPONSE]);

    dominfo()
        .args(["example.com", "--iana-server", "127.0.0.1", "--port", &port.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("example.com"))
        .stdout(predicate::str::contains("Example Registrar"))
        .stdout(predicate::str::contains("1995-08-14T04:00:00+00:00"))
        .stdout(predicate::str::contains("B.IANA-SERVERS.NET"))
        .stdout(predicate::str::contains("dnssec"));
    server.join().unwrap();
}

#[test]
fn test_raw_output() {
    let (port, server) = spawn_whois_server(vec![ROOT_RESPONSE, RECORD_RESPONSE]);

    dominfo()
        .args(["example.com", "-s", "127.0.0.1", "--port", &port.to_string(), "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("127.0.0.1"))
        .stdout(predicate::str::contains("Registrar: Example Registrar"));
    server.join().unwrap();
}

#[test]
fn test_referral_not_found_exits_nonzero() {
    let (port, server) = spawn_whois_server(vec![b"% no referral here\n"]);

    dominfo()
        .args(["example.test", "-s", "127.0.0.1", "--port", &port.to_string()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("WHOIS server not found"));
    server.join().unwrap();
}

#[test]
fn test_connection_refused_exits_nonzero() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    dominfo()
        .args(["example.com", "-s", "127.0.0.1", "--port", &port.to_string(), "-t", "2s"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to connect to 127.0.0.1"));
}

#[test]
fn test_invalid_timeout_rejected() {
    dominfo()
        .args(["example.com", "--timeout", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timeout"));
}

#[test]
fn test_config_file_sets_json_and_server() {
    let (port, server) = spawn_whois_server(vec![ROOT_RESPONSE, RECORD_RESPONSE]);

    let config = NamedTempFile::new().unwrap();
    fs::write(
        config.path(),
        format!(
            "[defaults]\nroot_server = \"127.0.0.1\"\nport = {}\njson = true\ntimeout = \"5s\"\n",
            port
        ),
    )
    .unwrap();

    dominfo()
        .args(["example.com", "--config", config.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"registrar\": \"Example Registrar\""));
    server.join().unwrap();
}

#[test]
fn test_config_pretty_false_prints_compact_json() {
    let (port, server) = spawn_whois_server(vec![ROOT_RESPONSE, RECORD_RESPONSE]);

    let config = NamedTempFile::new().unwrap();
    fs::write(
        config.path(),
        format!(
            "[defaults]\nroot_server = \"127.0.0.1\"\nport = {}\npretty = false\n",
            port
        ),
    )
    .unwrap();

    let output = dominfo()
        .args(["example.com", "--json", "--config", config.path().to_str().unwrap()])
        .output()
        .unwrap();
    server.join().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim_end().lines().count(), 1);
    assert!(stdout.contains("\"registrar\":\"Example Registrar\""));
    assert!(stdout.contains("\"creation_date\":\"1995-08-14T04:00:00+00:00\""));
}

#[test]
fn test_env_overrides_config_file() {
    let (port, server) = spawn_whois_server(vec![ROOT_RESPONSE, RECORD_RESPONSE]);

    let config = NamedTempFile::new().unwrap();
    fs::write(config.path(), "[defaults]\nroot_server = \"unreachable.invalid\"\n").unwrap();

    dominfo()
        .args(["example.com", "--json"])
        .env("DOMINFO_CONFIG", config.path())
        .env("DOMINFO_ROOT_SERVER", "127.0.0.1")
        .env("DOMINFO_PORT", port.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"domain_name\": \"EXAMPLE.COM\""));
    server.join().unwrap();
}

#[test]
fn test_invalid_config_file_rejected() {
    let config = NamedTempFile::new().unwrap();
    fs::write(config.path(), "[defaults]\nport = 0\n").unwrap();

    dominfo()
        .args(["example.com", "--config", config.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config file"));
}
