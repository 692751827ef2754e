
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;
use setup::*;

#[test]
fn test_help_lists_query_flags() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("--help")
        .assert()
        .success()
        .stdout(
            contains("--query")
                .and(contains("--explain"))
                .and(contains("--fetch-size"))
                .and(contains("--vertical")),
        );
}

#[test]
fn test_username_requires_password() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .args(["-u", "admin"])
        .assert()
        .failure()
        .stderr(contains("--password <PASSWORD>"));
}

#[test]
fn test_unknown_flag_fails() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("--nonsense")
        .assert()
        .failure();
}

#[test]
fn test_version() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("searchsql"));
}
