
use setup::*;

// Nothing listens on port 1, so connecting fails immediately. The process
// must report the failure and still exit cleanly.
const UNREACHABLE: &str = "http://localhost:1";

#[test]
fn test_connect_error_explain() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .arg(UNREACHABLE)
        .arg("-q")
        .arg("select * from accounts")
        .arg("-e")
        .assert()
        .success()
        .stdout(format!("Can not connect to endpoint {UNREACHABLE}\n"));
}

#[test]
fn test_connect_error_tabular() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .arg(UNREACHABLE)
        .arg("-q")
        .arg("select * from accounts")
        .assert()
        .success()
        .stdout(format!("Can not connect to endpoint {UNREACHABLE}\n"));
}
