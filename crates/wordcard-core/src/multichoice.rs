//! Multiple-choice question generation and grading.
//!
//! Every word becomes one question whose prompt is the definition. The
//! choices are vocabulary strings: the word itself in a random slot plus
//! up to three distractors drawn without repetition from the other words.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SamplingError, SessionError};
use crate::grade::GradeEntry;
use crate::model::Word;
use crate::sampling::{quiz_order, sample_distinct_excluding};
use crate::traits::{ProgressKeys, StudyMode};

/// Upper bound on choices per question.
pub const MAX_CHOICES: usize = 4;

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Vocabulary text shown to the user.
    pub description: String,
    /// Speech locale of `description`.
    pub sound: String,
    pub is_answer: bool,
    /// Word the choice was drawn from.
    #[serde(default)]
    pub word_id: String,
}

impl Choice {
    fn from_word(word: &Word, is_answer: bool) -> Self {
        Self {
            description: word.vocabulary.clone(),
            sound: word.vocabulary_sound.clone(),
            is_answer,
            word_id: word.id.clone(),
        }
    }
}

/// A generated question: `q` is `(prompt, prompt_sound)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiChoiceQuestion {
    pub q: (String, String),
    pub choices: Vec<Choice>,
}

impl MultiChoiceQuestion {
    /// Index of the correct choice.
    pub fn answer_index(&self) -> Option<usize> {
        self.choices.iter().position(|c| c.is_answer)
    }

    pub fn answer(&self) -> Option<&Choice> {
        self.choices.iter().find(|c| c.is_answer)
    }
}

/// Build one question per word.
///
/// Words are shuffled when `random` is set, otherwise sorted by vocabulary.
/// Each question has `min(4, words.len())` choices.
pub fn generate_questions<R: Rng>(
    words: &[Word],
    random: bool,
    rng: &mut R,
) -> Result<Vec<MultiChoiceQuestion>, SamplingError> {
    let ordered = quiz_order(words, random, rng);
    let choice_count = MAX_CHOICES.min(ordered.len());

    let mut questions = Vec::with_capacity(ordered.len());
    for (i, word) in ordered.iter().enumerate() {
        let answer_slot = rng.random_range(0..choice_count);
        let distractors = sample_distinct_excluding(rng, ordered.len(), choice_count - 1, &[i])?;

        let mut choices: Vec<Choice> = distractors
            .iter()
            .map(|&d| Choice::from_word(&ordered[d], false))
            .collect();
        choices.insert(answer_slot, Choice::from_word(word, true));

        questions.push(MultiChoiceQuestion {
            q: (word.definition.clone(), word.definition_sound.clone()),
            choices,
        });
    }

    tracing::debug!(
        questions = questions.len(),
        choices = choice_count,
        random,
        "generated multiple-choice questions"
    );
    Ok(questions)
}

/// Outcome of one multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiChoiceRecord {
    /// `None` when the user skipped to the answer.
    pub chosen_index: Option<usize>,
    pub is_correct: bool,
}

/// The multiple-choice study mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiChoice;

impl StudyMode for MultiChoice {
    type Question = MultiChoiceQuestion;
    type Record = MultiChoiceRecord;
    type Answer = usize;

    const NAME: &'static str = "multichoice";

    const KEYS: ProgressKeys = ProgressKeys {
        records_all: "multiChoiceRecordForAll",
        records_starred: "multiChoiceRecordForStar",
        grades_all: "gradeForAll",
        grades_starred: "gradeForStar",
        questions_all: "allQuestions",
        questions_starred: "starQuestions",
    };

    const SHUFFLE_CLEARS_ALL_TRACKS: bool = true;

    fn build_questions<R: Rng>(
        words: &[Word],
        random: bool,
        rng: &mut R,
    ) -> Result<Vec<Self::Question>, SamplingError> {
        generate_questions(words, random, rng)
    }

    fn check(question: &Self::Question, answer: &usize) -> Result<Self::Record, SessionError> {
        let choice = question
            .choices
            .get(*answer)
            .ok_or(SessionError::InvalidChoice {
                index: *answer,
                count: question.choices.len(),
            })?;
        Ok(MultiChoiceRecord {
            chosen_index: Some(*answer),
            is_correct: choice.is_answer,
        })
    }

    fn skipped(_question: &Self::Question) -> Self::Record {
        MultiChoiceRecord {
            chosen_index: None,
            is_correct: false,
        }
    }

    fn is_correct(record: &Self::Record) -> bool {
        record.is_correct
    }

    fn grade_entry(question: &Self::Question, number: usize, skip: bool) -> GradeEntry {
        let (ans, ans_sound) = question
            .answer()
            .map(|c| (c.description.clone(), c.sound.clone()))
            .unwrap_or_default();
        GradeEntry {
            skip,
            num_of_question: number,
            q: question.q.0.clone(),
            ans,
            q_sound: question.q.1.clone(),
            ans_sound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{test_deck, test_word};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn words(n: usize) -> Vec<Word> {
        (0..n)
            .map(|i| test_word(&format!("w{i}"), &format!("vocab{i}"), &format!("def{i}"), false))
            .collect()
    }

    #[test]
    fn every_question_has_one_answer_and_distinct_words() {
        for n in 1..=7 {
            let mut rng = StdRng::seed_from_u64(n as u64);
            let questions = generate_questions(&words(n), true, &mut rng).unwrap();
            assert_eq!(questions.len(), n);
            for q in &questions {
                assert_eq!(q.choices.len(), MAX_CHOICES.min(n));
                assert_eq!(q.choices.iter().filter(|c| c.is_answer).count(), 1);
                let ids: HashSet<_> = q.choices.iter().map(|c| c.word_id.as_str()).collect();
                assert_eq!(ids.len(), q.choices.len());
            }
        }
    }

    #[test]
    fn answer_matches_prompt_word() {
        let mut rng = StdRng::seed_from_u64(9);
        let questions = generate_questions(&words(6), true, &mut rng).unwrap();
        for q in &questions {
            let answer = q.answer().unwrap();
            let index = answer.word_id.trim_start_matches('w');
            assert_eq!(q.q.0, format!("def{index}"));
            assert_eq!(q.q.1, "zh-TW");
            assert_eq!(answer.sound, "en-US");
        }
    }

    #[test]
    fn shuffled_questions_cover_every_word() {
        let mut rng = StdRng::seed_from_u64(5);
        let questions = generate_questions(&words(10), true, &mut rng).unwrap();
        let mut prompts: Vec<_> = questions.iter().map(|q| q.q.0.clone()).collect();
        prompts.sort();
        let mut expected: Vec<_> = (0..10).map(|i| format!("def{i}")).collect();
        expected.sort();
        assert_eq!(prompts, expected);
    }

    #[test]
    fn non_random_is_sorted_by_vocabulary() {
        let deck = test_deck(&[
            ("echo", "5", false),
            ("Bravo", "2", false),
            ("delta", "4", false),
            ("alpha", "1", false),
            ("Charlie", "3", false),
        ]);
        let mut rng = StdRng::seed_from_u64(1);
        let questions = generate_questions(&deck.words, false, &mut rng).unwrap();
        let prompts: Vec<_> = questions.iter().map(|q| q.q.0.as_str()).collect();
        assert_eq!(prompts, ["1", "2", "3", "4", "5"]);
        assert!(questions.iter().all(|q| q.choices.len() == 4));
    }

    #[test]
    fn empty_and_single_word() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_questions(&[], true, &mut rng).unwrap().is_empty());

        let questions = generate_questions(&words(1), false, &mut rng).unwrap();
        assert_eq!(questions[0].choices.len(), 1);
        assert!(questions[0].choices[0].is_answer);
    }

    #[test]
    fn check_and_skip_records() {
        let mut rng = StdRng::seed_from_u64(2);
        let q = &generate_questions(&words(4), false, &mut rng).unwrap()[0];
        let right = q.answer_index().unwrap();
        let wrong = (right + 1) % 4;

        assert!(MultiChoice::check(q, &right).unwrap().is_correct);
        let record = MultiChoice::check(q, &wrong).unwrap();
        assert!(!record.is_correct);
        assert_eq!(record.chosen_index, Some(wrong));
        assert_eq!(
            MultiChoice::check(q, &4).unwrap_err(),
            SessionError::InvalidChoice { index: 4, count: 4 }
        );

        let skipped = MultiChoice::skipped(q);
        assert_eq!(skipped.chosen_index, None);
        assert!(!MultiChoice::is_correct(&skipped));
    }

    #[test]
    fn grade_entry_carries_prompt_and_answer() {
        let mut rng = StdRng::seed_from_u64(2);
        let q = &generate_questions(&words(3), false, &mut rng).unwrap()[0];
        let entry = MultiChoice::grade_entry(q, 1, true);
        assert!(entry.skip);
        assert_eq!(entry.num_of_question, 1);
        assert_eq!(entry.q, "def0");
        assert_eq!(entry.ans, "vocab0");
        assert_eq!(entry.q_sound, "zh-TW");
        assert_eq!(entry.ans_sound, "en-US");
    }

    #[test]
    fn question_prompt_serializes_as_pair() {
        let mut rng = StdRng::seed_from_u64(2);
        let q = &generate_questions(&words(2), false, &mut rng).unwrap()[0];
        let json = serde_json::to_value(q).unwrap();
        assert_eq!(json["q"], serde_json::json!(["def0", "zh-TW"]));
        assert!(json["choices"][0].get("isAnswer").is_some());
    }
}
