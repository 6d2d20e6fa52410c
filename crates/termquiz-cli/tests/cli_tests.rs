//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn termquiz() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("termquiz").unwrap()
}

fn quizzes_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../quizzes")
}

/// Temp dir holding a config with typing disabled, so runs do not depend on
/// whatever config the machine has.
fn run_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("termquiz.toml"),
        "typing_delay_ms = 0\nmax_invalid_answers = 3\n",
    )
    .unwrap();
    dir
}

fn run_cmd(dir: &TempDir, quiz: &Path) -> Command {
    let mut cmd = termquiz();
    cmd.arg("run")
        .arg("--quiz")
        .arg(quiz)
        .arg("--config")
        .arg(dir.path().join("termquiz.toml"))
        .arg("--output")
        .arg(dir.path().join("results"));
    cmd
}

fn saved_reports(dir: &TempDir) -> Vec<PathBuf> {
    match std::fs::read_dir(dir.path().join("results")) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn validate_single_quiz() {
    termquiz()
        .arg("validate")
        .arg("--quiz")
        .arg(quizzes_dir().join("istqb-a.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("5 questions, pass at 3"))
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn validate_directory() {
    termquiz()
        .arg("validate")
        .arg("--quiz")
        .arg(quizzes_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("ISTQB Foundation Level Exam A"))
        .stdout(predicate::str::contains("ISTQB Foundation Level Exam B"))
        .stdout(predicate::str::contains("ISTQB Foundation Level Exam C"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(
        &path,
        r#"
[quiz]
id = "broken"
name = "Broken"

[[questions]]
id = "q1"
prompt = "Only one way out?"
choices = ["yes"]
correct = ["b"]
"#,
    )
    .unwrap();

    termquiz()
        .arg("validate")
        .arg("--quiz")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[q1] WARNING"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    termquiz()
        .arg("validate")
        .arg("--quiz")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn run_single_quiz_and_win() {
    let dir = run_dir();
    run_cmd(&dir, &quizzes_dir().join("istqb-a.toml"))
        .write_stdin("b\nB\nb\na\nc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question #5"))
        .stdout(predicate::str::contains("You win"))
        .stdout(predicate::str::contains("5/5"))
        .stderr(predicate::str::contains("Results saved to"));

    let reports = saved_reports(&dir);
    assert_eq!(reports.len(), 1);
    let json = std::fs::read_to_string(&reports[0]).unwrap();
    assert!(json.contains("\"passed\": true"));
}

#[test]
fn run_single_quiz_and_lose() {
    let dir = run_dir();
    run_cmd(&dir, &quizzes_dir().join("istqb-a.toml"))
        .write_stdin("a\nb\nd\nd\nc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You lose"))
        .stdout(predicate::str::contains("2/5"))
        .stdout(predicate::str::contains("Rome wasn't built in a day"));
}

#[test]
fn run_repeats_question_on_invalid_answer() {
    let dir = run_dir();
    run_cmd(&dir, &quizzes_dir().join("istqb-a.toml"))
        .write_stdin("zzz\nb\nb\nb\na\nc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Looks like you typed an incorrect letter or word...",
        ))
        .stdout(predicate::str::contains("5/5"));
}

#[test]
fn run_strips_markup() {
    let dir = run_dir();
    run_cmd(&dir, &quizzes_dir().join("istqb-b.toml"))
        .write_stdin("b\na\nc\nc\na\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("A) Test design"))
        .stdout(predicate::str::contains("[[;").not());
}

#[test]
fn run_directory_picks_by_letter() {
    let dir = run_dir();
    run_cmd(&dir, &quizzes_dir())
        .write_stdin("x\nb\nb\na\nc\nc\na\nno\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("A) ISTQB Foundation Level Exam A"))
        .stdout(predicate::str::contains("C) ISTQB Foundation Level Exam C"))
        .stdout(predicate::str::contains("Starting ISTQB Foundation Level Exam B"))
        .stdout(predicate::str::contains("You win"))
        .stdout(predicate::str::contains("Let's keep practicing"));

    assert_eq!(saved_reports(&dir).len(), 1);
}

#[test]
fn run_directory_offers_third_exam() {
    let dir = run_dir();
    run_cmd(&dir, &quizzes_dir())
        .write_stdin("c\nb\na\nd\nb\nd\nno\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting ISTQB Foundation Level Exam C"))
        .stdout(predicate::str::contains("5/5"));

    assert_eq!(saved_reports(&dir).len(), 1);
}

#[test]
fn run_fails_when_input_ends() {
    let dir = run_dir();
    run_cmd(&dir, &quizzes_dir().join("istqb-a.toml"))
        .write_stdin("b\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input closed"));

    assert!(saved_reports(&dir).is_empty());
}

#[test]
fn run_seeded_shuffle_is_repeatable() {
    let outputs: Vec<String> = (0..2)
        .map(|_| {
            let dir = run_dir();
            let out = run_cmd(&dir, &quizzes_dir().join("istqb-a.toml"))
                .arg("--shuffle")
                .arg("--seed")
                .arg("11")
                .write_stdin("a\na\na\na\na\n")
                .output()
                .unwrap();
            assert!(out.status.success());
            String::from_utf8(out.stdout).unwrap()
        })
        .collect();
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn range_forms() {
    termquiz()
        .args(["range", "5"])
        .assert()
        .success()
        .stdout("0 1 2 3 4\n");
    termquiz()
        .args(["range", "5", "1"])
        .assert()
        .success()
        .stdout("5 4 3 2\n");
    termquiz()
        .args(["range", "10", "0", "-3"])
        .assert()
        .success()
        .stdout("10 7 4 1\n");
    termquiz()
        .args(["range", "1", "5", "-1"])
        .assert()
        .success()
        .stdout("\n");
    termquiz()
        .args(["range", "-3"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn range_stops_before_overflow() {
    termquiz()
        .args(["range", "9223372036854775806", "9223372036854775807", "5"])
        .assert()
        .success()
        .stdout("9223372036854775806\n");
}

#[test]
fn range_rejects_bad_arity() {
    termquiz()
        .arg("range")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 1 to 3 arguments, got 0"));
    termquiz()
        .args(["range", "1", "2", "3", "4"])
        .assert()
        .failure();
}

#[test]
fn sort_text_and_numbers() {
    termquiz()
        .args(["sort", "pear", "apple", "fig"])
        .assert()
        .success()
        .stdout("apple fig pear\n");
    termquiz()
        .args(["sort", "10", "9", "100"])
        .assert()
        .success()
        .stdout("10 100 9\n");
    termquiz()
        .args(["sort", "--numeric", "10", "9", "100", "-2.5"])
        .assert()
        .success()
        .stdout("-2.5 9 10 100\n");
    termquiz()
        .args(["sort", "--numeric", "--reverse", "1", "3", "2"])
        .assert()
        .success()
        .stdout("3 2 1\n");
}

#[test]
fn sort_numeric_is_stable() {
    termquiz()
        .args(["sort", "--numeric", "2", "1.0", "2.0", "1"])
        .assert()
        .success()
        .stdout("1.0 1 2 2.0\n");
}

#[test]
fn sort_numeric_errors() {
    termquiz()
        .args(["sort", "--numeric", "1", "two"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a number"));
    termquiz()
        .args(["sort", "--numeric", "NaN", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("comparator failed"));
}

#[test]
fn shuffle_is_permutation_and_seeded() {
    let run = || {
        let out = termquiz()
            .args(["shuffle", "--seed", "7", "a", "b", "c", "d", "e"])
            .output()
            .unwrap();
        assert!(out.status.success());
        String::from_utf8(out.stdout).unwrap()
    };
    let first = run();
    assert_eq!(first, run());

    let mut items: Vec<&str> = first.split_whitespace().collect();
    items.sort();
    assert_eq!(items, vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    termquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created termquiz.toml"))
        .stdout(predicate::str::contains("Created quizzes/example.toml"));

    assert!(dir.path().join("termquiz.toml").exists());
    assert!(dir.path().join("quizzes/example.toml").exists());

    termquiz()
        .current_dir(dir.path())
        .args(["validate", "--quiz", "quizzes/example.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    termquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    // Second init should skip
    termquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    termquiz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terminal multiple-choice quiz runner"));
}

#[test]
fn version_output() {
    termquiz()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("termquiz"));
}
