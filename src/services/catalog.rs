use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::Deserialize;

use crate::models::Tutor;

/// Sort keys the tutor listing accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TutorSort {
    Rating,
    PriceAsc,
    PriceDesc,
    Random,
}

/// Orders tutors in place. Random order is reshuffled on every call.
pub fn sort_tutors(tutors: &mut [Tutor], sort: TutorSort) {
    match sort {
        TutorSort::Rating => tutors.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        TutorSort::PriceAsc => tutors.sort_by_key(|t| t.price),
        TutorSort::PriceDesc => tutors.sort_by_key(|t| std::cmp::Reverse(t.price)),
        TutorSort::Random => tutors.shuffle(&mut thread_rng()),
    }
}

/// Picks at most `n` tutors without replacement; the whole catalog comes
/// back when it holds fewer than `n`.
pub fn sample_tutors(tutors: &[Tutor], n: usize) -> Vec<Tutor> {
    tutors
        .choose_multiple(&mut thread_rng(), n)
        .cloned()
        .collect()
}
