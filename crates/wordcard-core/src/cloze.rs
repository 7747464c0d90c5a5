//! Fill-in-the-blank study mode.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SamplingError, SessionError};
use crate::grade::GradeEntry;
use crate::model::Word;
use crate::sampling::quiz_order;
use crate::traits::{ProgressKeys, StudyMode};

/// A cloze question: show `q`, expect `ans` typed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClozeQuestion {
    /// `(prompt, prompt_sound)`.
    pub q: (String, String),
    pub ans: String,
    pub ans_sound: String,
}

/// Outcome of one cloze question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClozeRecord {
    pub ans: String,
    pub user_ans: String,
    pub is_correct: bool,
}

/// Build one cloze question per word, ordered like multiple choice.
pub fn generate_cloze<R: Rng>(words: &[Word], random: bool, rng: &mut R) -> Vec<ClozeQuestion> {
    quiz_order(words, random, rng)
        .into_iter()
        .map(|w| ClozeQuestion {
            q: (w.definition, w.definition_sound),
            ans: w.vocabulary,
            ans_sound: w.vocabulary_sound,
        })
        .collect()
}

/// Hint for `answer`: its first character followed by one underscore per
/// remaining character.
pub fn hint_mask(answer: &str) -> String {
    let mut chars = answer.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::from(first);
            out.extend(chars.map(|_| '_'));
            out
        }
        None => String::new(),
    }
}

/// The cloze study mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cloze;

impl StudyMode for Cloze {
    type Question = ClozeQuestion;
    type Record = ClozeRecord;
    type Answer = str;

    const NAME: &'static str = "cloze";

    const KEYS: ProgressKeys = ProgressKeys {
        records_all: "clozeRecordForAll",
        records_starred: "clozeRecordForStar",
        grades_all: "clozeGradeForAll",
        grades_starred: "clozeGradeForStar",
        questions_all: "clozeAllQuestions",
        questions_starred: "clozeStarQuestions",
    };

    const SHUFFLE_CLEARS_ALL_TRACKS: bool = false;

    fn build_questions<R: Rng>(
        words: &[Word],
        random: bool,
        rng: &mut R,
    ) -> Result<Vec<Self::Question>, SamplingError> {
        Ok(generate_cloze(words, random, rng))
    }

    fn check(question: &Self::Question, answer: &str) -> Result<Self::Record, SessionError> {
        let user_ans = answer.trim().to_string();
        Ok(ClozeRecord {
            is_correct: user_ans == question.ans,
            ans: question.ans.clone(),
            user_ans,
        })
    }

    fn skipped(question: &Self::Question) -> Self::Record {
        ClozeRecord {
            ans: question.ans.clone(),
            user_ans: String::new(),
            is_correct: false,
        }
    }

    fn is_correct(record: &Self::Record) -> bool {
        record.is_correct
    }

    fn grade_entry(question: &Self::Question, number: usize, skip: bool) -> GradeEntry {
        GradeEntry {
            skip,
            num_of_question: number,
            q: question.q.0.clone(),
            ans: question.ans.clone(),
            q_sound: question.q.1.clone(),
            ans_sound: question.ans_sound.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_deck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question() -> ClozeQuestion {
        ClozeQuestion {
            q: ("蘋果".into(), "zh-TW".into()),
            ans: "apple".into(),
            ans_sound: "en-US".into(),
        }
    }

    #[test]
    fn exact_match_after_trim() {
        let q = question();
        assert!(Cloze::check(&q, "  apple\n").unwrap().is_correct);
        let wrong = Cloze::check(&q, "Apple").unwrap();
        assert!(!wrong.is_correct);
        assert_eq!(wrong.user_ans, "Apple");
        assert_eq!(wrong.ans, "apple");
    }

    #[test]
    fn skip_is_incorrect_with_empty_answer() {
        let record = Cloze::skipped(&question());
        assert!(!record.is_correct);
        assert!(record.user_ans.is_empty());
        let entry = Cloze::grade_entry(&question(), 3, true);
        assert!(entry.skip);
        assert_eq!(entry.num_of_question, 3);
        assert_eq!(entry.ans, "apple");
        assert_eq!(entry.q_sound, "zh-TW");
    }

    #[test]
    fn hint_reveals_first_char_and_length() {
        assert_eq!(hint_mask("apple"), "a____");
        assert_eq!(hint_mask("蘋果"), "蘋_");
        assert_eq!(hint_mask("x"), "x");
        assert_eq!(hint_mask(""), "");
    }

    #[test]
    fn questions_follow_swap_and_sort() {
        let mut deck = test_deck(&[("banana", "香蕉", false), ("apple", "蘋果", false)]);
        deck.should_swap = true;
        let mut rng = StdRng::seed_from_u64(1);
        let questions = generate_cloze(&deck.study_words(), false, &mut rng);
        assert_eq!(questions[0].ans, "蘋果");
        assert_eq!(questions[0].q.0, "apple");
        assert_eq!(questions[0].ans_sound, "zh-TW");
        assert_eq!(questions[1].ans, "香蕉");
    }

    #[test]
    fn record_wire_names() {
        let record = Cloze::check(&question(), "apple").unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userAns"], "apple");
        assert_eq!(json["isCorrect"], true);
    }
}
