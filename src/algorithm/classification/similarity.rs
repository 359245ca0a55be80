//! Gestalt pattern matching similarity
//!
//! Implements the Ratcliff/Obershelp ratio: find the longest common block,
//! recurse on the unmatched remainders to its left and right, and score
//! `2 * matched / (len(a) + len(b))`. Strings are compared per Unicode scalar
//! value. Ties between equally long blocks resolve to the block starting
//! earliest in `a`, then earliest in `b`, so scores are reproducible.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Length from which characters occurring in more than 1% of `b` are pruned
const AUTOJUNK_MIN_LEN: usize = 200;

/// A comparison target with its character index precomputed
///
/// Taxonomy names are compared against every department token, so the
/// per-name work is done once up front.
#[derive(Debug, Clone)]
pub struct PreparedName {
    chars: Vec<char>,
    positions: FxHashMap<char, SmallVec<[usize; 4]>>,
}

impl PreparedName {
    /// Index a comparison target
    #[must_use]
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut positions: FxHashMap<char, SmallVec<[usize; 4]>> = FxHashMap::default();
        for (j, c) in chars.iter().enumerate() {
            positions.entry(*c).or_default().push(j);
        }

        // Popular characters in long targets never start or extend a match
        let n = chars.len();
        if n >= AUTOJUNK_MIN_LEN {
            let limit = n / 100 + 1;
            positions.retain(|_, js| js.len() <= limit);
        }

        Self {
            chars,
            positions,
        }
    }

    /// Length in characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the target is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Longest common block of `a[alo..ahi]` and `self[blo..bhi]`
    ///
    /// Returns `(i, j, size)`; `size` is 0 when nothing matches.
    fn longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        // Length of the match ending at b[j], for the previous row of a
        let mut run_lengths: FxHashMap<usize, usize> = FxHashMap::default();

        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next_run_lengths: FxHashMap<usize, usize> = FxHashMap::default();
            if let Some(js) = self.positions.get(c) {
                for &j in js {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_lengths.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_run_lengths.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            run_lengths = next_run_lengths;
        }

        // Pruned characters never seed a block but may still extend one
        while best_i > alo && best_j > blo && a[best_i - 1] == self.chars[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == self.chars[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }

    /// Total number of characters in all matching blocks between `a` and this target
    #[must_use]
    pub fn matching_characters(&self, a: &[char]) -> usize {
        let mut matched = 0;
        let mut pending = vec![(0, a.len(), 0, self.chars.len())];

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_match(a, alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            matched += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }

        matched
    }

    /// Similarity ratio in `[0.0, 1.0]` between `a` and this target
    #[must_use]
    pub fn ratio_chars(&self, a: &[char]) -> f64 {
        let total = a.len() + self.chars.len();
        if total == 0 {
            return 1.0;
        }
        if a == self.chars.as_slice() {
            return 1.0;
        }
        let matched = self.matching_characters(a);
        2.0 * matched as f64 / total as f64
    }

    /// Similarity ratio in `[0.0, 1.0]` between `a` and this target
    #[must_use]
    pub fn ratio(&self, a: &str) -> f64 {
        let chars: Vec<char> = a.chars().collect();
        self.ratio_chars(&chars)
    }
}

/// Similarity ratio between two strings
///
/// `b` is indexed; when comparing one string against many fixed targets,
/// build [`PreparedName`]s once instead.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    PreparedName::new(b).ratio(a)
}
