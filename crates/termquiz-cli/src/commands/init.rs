//! The `termquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create termquiz.toml
    if std::path::Path::new("termquiz.toml").exists() {
        println!("termquiz.toml already exists, skipping.");
    } else {
        std::fs::write("termquiz.toml", SAMPLE_CONFIG)?;
        println!("Created termquiz.toml");
    }

    // Create example quiz
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add your own questions to quizzes/");
    println!("  2. Run: termquiz validate --quiz quizzes/example.toml");
    println!("  3. Run: termquiz run --quiz quizzes");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# termquiz configuration

# Milliseconds between characters when text is typed out (0 = instant)
typing_delay_ms = 2

# Ask questions in random order; set `seed` for a repeatable order
shuffle_questions = false
# seed = 42

# Unrecognized answers allowed per question before moving on (0 = unlimited)
max_invalid_answers = 3

# Where run reports are written; ${VAR} references are expanded
output_dir = "./termquiz-results"

newline = true
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
id = "example"
name = "Example Quiz"
description = "Two questions to get started"
pass_threshold = 1

[[questions]]
id = "test-condition"
prompt = "Which one of the following answers describes a test condition?"
choices = [
    "A distinguishing characteristic of a component or system",
    "A testable aspect of a component or system identified as a basis for testing",
    "The degree to which a software product provides functions which meet stated and implied needs",
    "Test cases designed to execute combinations of conditions and actions resulting from them",
]
correct = ["b"]

[[questions]]
id = "testing-objective"
prompt = "Which of the following statements is a valid objective for testing?"
choices = [
    "The test should start as late as possible so that development had enough time to create a good product",
    "To validate whether the test object works as expected by the users and other stakeholders",
    "To prove that all possible defects are identified",
    "To prove that any remaining defects will not cause any failures",
]
correct = ["b"]
"#;
