//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn wordcard() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("wordcard").unwrap()
}

/// Config with instant timers and the data dir inside `dir`.
fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("test-config.toml");
    std::fs::write(
        &path,
        format!(
            "data_dir = {:?}\nfeedback_ms = 0\ngrade_modal_delay_ms = 0\nautoplay_lead_ms = 0\nautoplay_hold_ms = 0\n",
            dir.join("data")
        ),
    )
    .unwrap();
    path
}

fn word(id: &str, order: i64, vocabulary: &str, definition: &str, star: bool) -> Value {
    json!({
        "id": id,
        "order": order,
        "vocabulary": vocabulary,
        "definition": definition,
        "vocabularySound": "en-US",
        "definitionSound": "zh-TW",
        "star": star
    })
}

fn write_deck(dir: &Path, name: &str, id: &str, words: Vec<Value>) -> PathBuf {
    let path = dir.join(name);
    let deck = json!({"id": id, "title": "Fruit", "shouldSwap": false, "words": words});
    std::fs::write(&path, serde_json::to_string_pretty(&deck).unwrap()).unwrap();
    path
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn sample_deck(dir: &Path) -> PathBuf {
    wordcard().current_dir(dir).arg("init").assert().success();
    dir.join("decks/sample.json")
}

#[test]
fn help_output() {
    wordcard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vocabulary flashcard trainer"));
}

#[test]
fn version_output() {
    wordcard()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wordcard"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    wordcard()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created wordcard.toml"))
        .stdout(predicate::str::contains("Created decks/sample.json"));

    assert!(dir.path().join("wordcard.toml").exists());
    assert!(dir.path().join("decks/sample.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    wordcard()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    // Second init should skip
    wordcard()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_sample_deck() {
    let dir = TempDir::new().unwrap();
    let deck = sample_deck(dir.path());

    wordcard()
        .arg("validate")
        .arg("--deck")
        .arg(&deck)
        .assert()
        .success()
        .stdout(predicate::str::contains("Word set: Fruit (5 words)"))
        .stdout(predicate::str::contains("All word sets valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let mut bad = word("w1", 2, "pear", "梨", false);
    bad["vocabularySound"] = json!("xx-XX");
    write_deck(
        dir.path(),
        "dup.json",
        "dup",
        vec![word("w1", 1, "apple", "蘋果", false), bad],
    );

    wordcard()
        .arg("validate")
        .arg("--deck")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate word id w1"))
        .stdout(predicate::str::contains("invalid vocabulary sound: xx-XX"))
        .stdout(predicate::str::contains("2 warning(s) found."));
}

#[test]
fn validate_flags_blank_definition() {
    let dir = TempDir::new().unwrap();
    let deck = write_deck(dir.path(), "blank.json", "blank", vec![word("w1", 1, "apple", "", false)]);

    wordcard()
        .arg("validate")
        .arg("--deck")
        .arg(&deck)
        .assert()
        .success()
        .stdout(predicate::str::contains("words[0]: definition must not be empty"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_nonexistent_file() {
    wordcard()
        .arg("validate")
        .arg("--deck")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn import_creates_deck() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let input = dir.path().join("fruit.txt");
    std::fs::write(&input, "apple  蘋果\n\nbanana  香蕉\n").unwrap();
    let output = dir.path().join("fruit.json");

    wordcard()
        .arg("--config")
        .arg(&config)
        .arg("import")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 words into fruit (2 total)"));

    let deck = read_json(&output);
    let words = deck["words"].as_array().unwrap();
    assert_eq!(words.len(), 2);
    assert_eq!(words[0]["vocabulary"], "apple");
    assert_eq!(words[0]["order"], 1);
    assert_eq!(words[1]["definition"], "香蕉");
    assert_eq!(words[1]["order"], 2);
    assert_eq!(words[1]["definitionSound"], "zh-TW");
}

#[test]
fn import_custom_delimiters_into_existing_deck() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let existing = write_deck(
        dir.path(),
        "deck.json",
        "deck",
        vec![
            word("a", 1, "apple", "蘋果", false),
            word("b", 2, "banana", "香蕉", false),
        ],
    );
    let input = dir.path().join("more.txt");
    std::fs::write(&input, "fig=無花果;grape=葡萄").unwrap();
    let output = dir.path().join("merged.json");

    wordcard()
        .arg("--config")
        .arg(&config)
        .arg("import")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--into")
        .arg(&existing)
        .arg("--insert-at")
        .arg("1")
        .arg("--word-delimiter")
        .arg(";")
        .arg("--pair-delimiter")
        .arg("=")
        .arg("--vocabulary-sound")
        .arg("en-GB")
        .assert()
        .success()
        .stdout(predicate::str::contains("(4 total)"));

    let deck = read_json(&output);
    let words = deck["words"].as_array().unwrap();
    let vocab: Vec<_> = words.iter().map(|w| w["vocabulary"].as_str().unwrap()).collect();
    assert_eq!(vocab, ["apple", "fig", "grape", "banana"]);
    let orders: Vec<_> = words.iter().map(|w| w["order"].as_i64().unwrap()).collect();
    assert!(orders.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(words[1]["vocabularySound"], "en-GB");
    assert_eq!(deck["id"], "deck");
}

#[test]
fn import_rejects_reserved_delimiter() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let input = dir.path().join("words.txt");
    std::fs::write(&input, "apple#蘋果").unwrap();

    wordcard()
        .arg("--config")
        .arg(&config)
        .arg("import")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.json"))
        .arg("--pair-delimiter")
        .arg("#")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not contain '#'"));
}

#[test]
fn cards_print_in_alphabetical_order() {
    let dir = TempDir::new().unwrap();
    let deck = sample_deck(dir.path());

    wordcard()
        .arg("cards")
        .arg("--deck")
        .arg(&deck)
        .assert()
        .success()
        .stdout(predicate::str::contains("Fruit (5 cards)"))
        .stdout(predicate::str::contains("1. apple / 蘋果 *"))
        .stdout(predicate::str::contains("5. pear / 梨子"));

    wordcard()
        .arg("cards")
        .arg("--deck")
        .arg(&deck)
        .arg("--starred")
        .assert()
        .success()
        .stdout(predicate::str::contains("grape"))
        .stdout(predicate::str::contains("banana").not());
}

#[test]
fn cards_auto_play() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let deck = sample_deck(dir.path());

    wordcard()
        .arg("--config")
        .arg(&config)
        .arg("cards")
        .arg("--deck")
        .arg(&deck)
        .arg("--starred")
        .arg("--play")
        .assert()
        .success()
        .stdout(predicate::str::contains("[en-US] apple"))
        .stdout(predicate::str::contains("-> 葡萄"))
        .stdout(predicate::str::contains("Card 2/2"));
}

#[test]
fn quiz_single_word_deck() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let deck = write_deck(dir.path(), "one.json", "one", vec![word("w1", 1, "apple", "蘋果", false)]);

    wordcard()
        .arg("--config")
        .arg(&config)
        .arg("quiz")
        .arg("--deck")
        .arg(&deck)
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. 蘋果"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Score: 100% (1/1 correct)"))
        .stdout(predicate::str::contains("No mistakes."));

    let grades: Vec<_> = std::fs::read_dir(dir.path().join("data/grades"))
        .unwrap()
        .collect();
    assert_eq!(grades.len(), 1);
}

#[test]
fn quiz_skip_records_mistake() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let deck = write_deck(dir.path(), "one.json", "one", vec![word("w1", 1, "apple", "蘋果", false)]);

    wordcard()
        .arg("--config")
        .arg(&config)
        .arg("quiz")
        .arg("--deck")
        .arg(&deck)
        .write_stdin("s\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Answer: 蘋果"))
        .stdout(predicate::str::contains("Score: 0% (0/1 correct)"))
        .stdout(predicate::str::contains("1. apple -> 蘋果 (skipped)"));
}

#[test]
fn quiz_quit_saves_progress() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let deck = sample_deck(dir.path());

    wordcard()
        .arg("--config")
        .arg(&config)
        .arg("quiz")
        .arg("--deck")
        .arg(&deck)
        .arg("--starred")
        .arg("--seed")
        .arg("7")
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fruit: 2 questions (starred words)"))
        .stdout(predicate::str::contains("Progress saved."));

    let progress = read_json(&dir.path().join("data/progress.json"));
    assert!(progress.get("sample-curQuestionIndex").is_some());
    assert_eq!(progress["sample-allQuestions"].as_array().unwrap().len(), 5);
    assert_eq!(progress["sample-starQuestions"].as_array().unwrap().len(), 2);

    wordcard()
        .arg("--config")
        .arg(&config)
        .arg("reset")
        .arg("--deck")
        .arg(&deck)
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress for Fruit cleared."));

    let progress = read_json(&dir.path().join("data/progress.json"));
    assert!(progress.as_object().unwrap().keys().all(|k| !k.starts_with("sample-")));
}

#[test]
fn cloze_hint_answer_and_score() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let deck = write_deck(
        dir.path(),
        "two.json",
        "two",
        vec![
            word("w1", 1, "pear", "梨", false),
            word("w2", 2, "apple", "蘋果", false),
        ],
    );

    wordcard()
        .arg("--config")
        .arg(&config)
        .arg("cloze")
        .arg("--deck")
        .arg(&deck)
        .write_stdin("?\napple\nPEAR\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/2] 蘋果"))
        .stdout(predicate::str::contains("Hint: a____"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Wrong. Answer: pear"))
        .stdout(predicate::str::contains("Score: 50% (1/2 correct)"));
}

#[test]
fn report_renders_saved_sheets() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let deck = write_deck(dir.path(), "one.json", "one", vec![word("w1", 1, "apple", "蘋果", false)]);

    wordcard()
        .arg("--config")
        .arg(&config)
        .arg("quiz")
        .arg("--deck")
        .arg(&deck)
        .write_stdin("1\n")
        .assert()
        .success();

    let output = dir.path().join("report.md");
    wordcard()
        .arg("--config")
        .arg(&config)
        .arg("report")
        .arg("--deck")
        .arg(&deck)
        .arg("--format")
        .arg("markdown")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("markdown report (1 sessions)"));

    let report = std::fs::read_to_string(&output).unwrap();
    assert!(report.starts_with("# Fruit"));
    assert!(report.contains("**Score: 100%**"));

    let html = dir.path().join("cloze.html");
    wordcard()
        .arg("--config")
        .arg(&config)
        .arg("report")
        .arg("--deck")
        .arg(&deck)
        .arg("--mode")
        .arg("cloze")
        .arg("--output")
        .arg(&html)
        .assert()
        .success()
        .stderr(predicate::str::contains("No cloze grade sheets"));
    assert!(std::fs::read_to_string(&html).unwrap().contains("No grade sheets recorded yet."));
}
