use assert_cmd::Command;
use predicates::prelude::*;

fn validate_skill() -> Command {
    assert_cmd::cargo::cargo_bin_cmd!("validate-skill")
}

#[test]
fn valid_skill_exits_0() {
    validate_skill()
        .arg("tests/fixtures/valid-skill")
        .assert()
        .success()
        .stdout(predicate::str::contains("PASSED"));
}

#[test]
fn broken_skill_exits_1() {
    validate_skill()
        .arg("tests/fixtures/broken-skill")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("name-mismatch: "))
        .stdout(predicate::str::contains("incomplete-placeholder: "));
}

#[test]
fn skill_file_path_is_accepted() {
    validate_skill()
        .arg("tests/fixtures/valid-skill/SKILL.md")
        .assert()
        .success();
}

#[test]
fn warnings_pass_without_strict() {
    validate_skill()
        .arg("tests/fixtures/header-skill")
        .assert()
        .success()
        .stdout(predicate::str::contains("missing-descriptive-header"));
}

#[test]
fn warnings_fail_with_strict() {
    validate_skill()
        .args(["tests/fixtures/header-skill", "--strict"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("PASSED WITH WARNINGS"));
}

#[test]
fn strict_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("validate-skill.toml");
    std::fs::write(&config, "[strict]\nenabled = true\n").unwrap();

    validate_skill()
        .arg("tests/fixtures/header-skill")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1);
}

#[test]
fn verbose_prints_hints() {
    validate_skill()
        .args(["tests/fixtures/broken-skill", "--verbose"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("hint:"));
}

#[test]
fn collection_prints_summary_and_fails_if_any_fails() {
    validate_skill()
        .arg("tests/fixtures")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Collection Summary"))
        .stdout(predicate::str::contains("valid-skill"))
        .stdout(predicate::str::contains("broken-skill"));
}

#[test]
fn json_format() {
    validate_skill()
        .args(["tests/fixtures/broken-skill", "--format", "json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"passed\": false"));
}

#[test]
fn sarif_format() {
    validate_skill()
        .args(["tests/fixtures/valid-skill", "-f", "sarif"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\": \"2.1.0\""));
}

#[test]
fn nonexistent_path_exits_2() {
    validate_skill()
        .arg("tests/fixtures/does-not-exist")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn missing_path_argument_exits_2() {
    validate_skill().assert().code(2);
}

#[test]
fn unknown_flag_exits_2() {
    validate_skill()
        .args(["tests/fixtures/valid-skill", "--bogus"])
        .assert()
        .code(2);
}

#[test]
fn missing_config_file_exits_2() {
    validate_skill()
        .args([
            "tests/fixtures/valid-skill",
            "--config",
            "tests/fixtures/nope.toml",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn directory_without_skills_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    validate_skill()
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing-skill-md"));
}

#[cfg(unix)]
#[test]
fn unreadable_directory_is_logged_to_stderr() {
    use std::os::unix::fs::PermissionsExt;

    let root = tempfile::tempdir().unwrap();
    let skills = root.path().join("skills");
    std::fs::create_dir(&skills).unwrap();
    std::fs::set_permissions(&skills, std::fs::Permissions::from_mode(0o300)).unwrap();

    // Permission bits do not stop root.
    let blocked = std::fs::read_dir(&skills).is_err();
    let assert = validate_skill().arg(&skills).assert();
    std::fs::set_permissions(&skills, std::fs::Permissions::from_mode(0o755)).unwrap();
    if !blocked {
        return;
    }

    assert
        .code(1)
        .stderr(predicate::str::contains("skipping unreadable entry"))
        .stdout(predicate::str::contains("missing-skill-md"));
}

#[test]
fn list_rules_shows_rules() {
    validate_skill()
        .arg("list-rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("name-mismatch"))
        .stdout(predicate::str::contains("missing-descriptive-header"))
        .stdout(predicate::str::contains("Total: 16 rules"));
}

#[test]
fn explain_known_rule() {
    validate_skill()
        .args(["explain", "unknown-frontmatter-key"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remediation:"));
}

#[test]
fn explain_unknown_rule_exits_2() {
    validate_skill()
        .args(["explain", "no-such-rule"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown rule"));
}
