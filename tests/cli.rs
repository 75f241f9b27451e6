use assert_cmd::Command;
use predicates::prelude::*;

const SAMPLE_FASTA: &str = "tests/data/sample.fasta";

fn mutascope() -> Command {
    Command::cargo_bin("mutascope").unwrap()
}

#[test]
fn scan_inline_sequence() {
    let seq = format!("{}CGG{}", "A".repeat(20), "T".repeat(10));

    mutascope()
        .args(["scan", "--seq", &seq])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("1\t{}", "A".repeat(20))));
}

#[test]
fn scan_fasta_file() {
    // headers, line breaks and lowercase are all normalized away before scanning
    mutascope()
        .args(["scan", SAMPLE_FASTA])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("1\t{}", "A".repeat(20))));
}

#[test]
fn scan_overlapping_pam_run() {
    let seq = format!("{}GGG", "A".repeat(21));

    mutascope()
        .args(["scan", "--seq", &seq])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(format!("1\t{}", "A".repeat(20)))
                .and(predicate::str::contains(format!("2\t{}", "A".repeat(20)))),
        );
}

#[test]
fn scan_short_sequence_finds_nothing() {
    mutascope()
        .args(["scan", "--seq", "ATGG"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no PAM-adjacent targets found"));
}

#[test]
fn scan_warns_about_invalid_characters() {
    mutascope()
        .args(["scan", "--seq", "atgXc"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "invalid characters were removed from the input",
        ));
}

#[test]
fn scan_json_format() {
    let seq = format!("{}CGG{}", "A".repeat(20), "T".repeat(10));

    mutascope()
        .args(["scan", "--seq", &seq, "--format", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"position\": 1")
                .and(predicate::str::contains(&"A".repeat(20))),
        );
}

#[test]
fn scan_demo_sequence() {
    mutascope()
        .args(["scan", "--demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("position\tsequence"));
}

#[test]
fn file_doesnt_exist() {
    mutascope()
        .args(["scan", "file_which_does_not_exist.fasta"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to open file"));
}

#[test]
fn analyze_without_api_key_fails() {
    mutascope()
        .args(["analyze", "--demo"])
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no API key found"));
}
