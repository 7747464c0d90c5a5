//! Random helpers used by question generation and flashcard navigation.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SamplingError;
use crate::model::{sort_words, SortOrder, Word};

/// Return a uniformly shuffled copy of `items`.
pub fn shuffled<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Order words for a quiz: shuffled in random mode, else vocabulary A to Z.
pub fn quiz_order<R: Rng>(words: &[Word], random: bool, rng: &mut R) -> Vec<Word> {
    if random {
        shuffled(words, rng)
    } else {
        let mut sorted = words.to_vec();
        sort_words(&mut sorted, SortOrder::Alphabetical);
        sorted
    }
}

/// Draw `k` distinct indices from `0..len`, none of which appear in `excluded`.
///
/// Each draw is uniform over the remaining candidates (rejection sampling
/// against the growing used set). Fails up front when fewer than `k`
/// candidates exist, so the loop always terminates.
pub fn sample_distinct_excluding<R: Rng>(
    rng: &mut R,
    len: usize,
    k: usize,
    excluded: &[usize],
) -> Result<Vec<usize>, SamplingError> {
    let mut used: Vec<usize> = excluded.iter().copied().filter(|&i| i < len).collect();
    used.sort_unstable();
    used.dedup();

    let available = len - used.len();
    if k > available {
        return Err(SamplingError::NotEnoughCandidates {
            wanted: k,
            available,
        });
    }

    let mut picked = Vec::with_capacity(k);
    while picked.len() < k {
        let index = rng.random_range(0..len);
        if used.contains(&index) {
            continue;
        }
        used.push(index);
        picked.push(index);
    }
    Ok(picked)
}

/// Uniform index in `0..len`, or `None` for an empty range.
pub fn random_index<R: Rng>(rng: &mut R, len: usize) -> Option<usize> {
    (len > 0).then(|| rng.random_range(0..len))
}
