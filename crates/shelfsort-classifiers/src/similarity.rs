//! Indel-based similarity scoring
//!
//! Two strings are compared by the minimum number of single-character
//! insertions and deletions (no substitutions) needed to turn one into the
//! other. The ratio maps that distance onto a 0-100 integer score where 100
//! means identical input.

use shelfsort_core::{Error, Result};

/// Best candidate found by [`best_match_against`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch<'a> {
    /// Position of the candidate in the input slice
    pub index: usize,

    /// The winning candidate
    pub candidate: &'a str,

    /// Similarity score (0-100)
    pub score: u8,
}

/// Length of the longest common subsequence of two character sequences
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut prev = vec![0usize; inner.len() + 1];
    let mut curr = vec![0usize; inner.len() + 1];

    for &x in outer {
        for (j, &y) in inner.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[inner.len()]
}

/// Minimum number of insertions and deletions transforming `a` into `b`
pub fn indel_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    a.len() + b.len() - 2 * lcs_len(&a, &b)
}

/// Normalized similarity in `[0, 100]`.
///
/// `round(100 * (len(a) + len(b) - indel) / (len(a) + len(b)))`, rounding
/// halves to the nearest even integer. Two empty strings score 100; distinct
/// strings are capped at 99.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }

    // len(a) + len(b) - indel == 2 * lcs
    let lcs = lcs_len(&a, &b);
    let numerator = 200 * lcs;
    let mut quotient = numerator / total;
    let twice_rem = 2 * (numerator % total);
    if twice_rem > total || (twice_rem == total && quotient % 2 == 1) {
        quotient += 1;
    }

    // 100 is reserved for identical strings
    if quotient == 100 && 2 * lcs != total {
        quotient = 99;
    }

    quotient as u8
}

/// Score `token` against every candidate in order and return the first one
/// achieving the maximum score.
///
/// Fails with [`Error::InvalidArgument`] when `candidates` is empty.
pub fn best_match_against<'a, S>(token: &str, candidates: &'a [S]) -> Result<KeywordMatch<'a>>
where
    S: AsRef<str>,
{
    let mut best: Option<KeywordMatch<'a>> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let candidate = candidate.as_ref();
        let score = ratio(token, candidate);

        if best.map_or(true, |b| score > b.score) {
            best = Some(KeywordMatch {
                index,
                candidate,
                score,
            });
            if score == 100 {
                break;
            }
        }
    }

    best.ok_or_else(|| {
        Error::invalid_argument(format!("no candidates to match token '{}' against", token))
    })
}
