//! Flip-card navigation.

use rand::Rng;

use crate::model::{sort_words, SortOrder, StudyDeck, Word};
use crate::sampling::random_index;

/// A deck of flip cards with a cursor.
///
/// Cards are sorted by vocabulary. Every move resets the flip and hint state.
#[derive(Debug, Clone)]
pub struct FlashcardDeck {
    cards: Vec<Word>,
    index: usize,
    flipped: bool,
    hint_open: bool,
}

impl FlashcardDeck {
    /// Build from a deck, optionally keeping only starred words.
    pub fn new(deck: &StudyDeck, starred_only: bool) -> Self {
        let mut cards: Vec<Word> = deck
            .study_words()
            .into_iter()
            .filter(|w| !starred_only || w.star)
            .collect();
        sort_words(&mut cards, SortOrder::Alphabetical);
        Self {
            cards,
            index: 0,
            flipped: false,
            hint_open: false,
        }
    }

    pub fn cards(&self) -> &[Word] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Word> {
        self.cards.get(self.index)
    }

    /// Showing the definition side.
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn hint_open(&self) -> bool {
        self.hint_open
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.cards.len()
    }

    pub fn flip(&mut self) -> bool {
        self.flipped = !self.flipped;
        self.flipped
    }

    pub fn toggle_hint(&mut self) -> bool {
        self.hint_open = !self.hint_open;
        self.hint_open
    }

    /// Move forward. Returns `false` at the last card.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.move_to(self.index + 1);
        true
    }

    /// Move back. Returns `false` at the first card.
    pub fn prev(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.move_to(self.index - 1);
        true
    }

    pub fn from_start(&mut self) {
        self.move_to(0);
    }

    /// Jump to a uniformly random card. Returns the new index.
    pub fn jump_random<R: Rng>(&mut self, rng: &mut R) -> Option<usize> {
        let index = random_index(rng, self.cards.len())?;
        self.move_to(index);
        Some(index)
    }

    fn move_to(&mut self, index: usize) {
        self.index = index;
        self.flipped = false;
        self.hint_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_deck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn deck() -> FlashcardDeck {
        FlashcardDeck::new(
            &test_deck(&[("cherry", "c", false), ("Apple", "a", true), ("banana", "b", true)]),
            false,
        )
    }

    #[test]
    fn sorted_and_filtered() {
        let cards = deck();
        let v: Vec<_> = cards.cards().iter().map(|w| w.vocabulary.as_str()).collect();
        assert_eq!(v, ["Apple", "banana", "cherry"]);

        let starred = FlashcardDeck::new(
            &test_deck(&[("cherry", "c", false), ("Apple", "a", true)]),
            true,
        );
        assert_eq!(starred.len(), 1);
    }

    #[test]
    fn navigation_resets_flip_and_hint() {
        let mut cards = deck();
        assert!(!cards.prev());
        cards.flip();
        cards.toggle_hint();
        assert!(cards.next());
        assert!(!cards.is_flipped());
        assert!(!cards.hint_open());
        assert!(cards.next());
        assert!(cards.is_last());
        assert!(!cards.next());
        cards.from_start();
        assert_eq!(cards.index(), 0);
    }

    #[test]
    fn random_jump_in_range() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut cards = deck();
        for _ in 0..20 {
            let i = cards.jump_random(&mut rng).unwrap();
            assert!(i < 3);
            assert_eq!(cards.index(), i);
        }
        let mut empty = FlashcardDeck::new(&test_deck(&[]), false);
        assert_eq!(empty.jump_random(&mut rng), None);
        assert!(empty.current().is_none());
    }
}
