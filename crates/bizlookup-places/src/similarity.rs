//! Textual similarity between an extracted business name and a candidate's
//! display name.
//!
//! The ratio is the Ratcliff/Obershelp "gestalt" measure: find the longest
//! common block, recurse on the unmatched left and right remainders, and
//! report `2 * matched / (len(a) + len(b))`. Comparison is per Unicode scalar
//! value after case folding.

use std::collections::HashMap;

/// Floor applied when the business name appears verbatim inside the
/// candidate name.
pub const SUBSTRING_SCORE_FLOOR: f64 = 0.8;

/// Sequences at least this long get the "popular element" pruning: a
/// character occurring in more than 1 % of positions (plus one) is not used
/// to seed matches, only to extend them.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Scores how well `candidate_name` matches `business_name`, in `[0, 1]`.
///
/// Both inputs are case-folded. If the business name is a substring of the
/// candidate name the result is at least [`SUBSTRING_SCORE_FLOOR`], since
/// candidates often append descriptive words ("... Co of Utah").
#[must_use]
pub fn score(business_name: &str, candidate_name: &str) -> f64 {
    let business = business_name.to_lowercase();
    let candidate = candidate_name.to_lowercase();

    let ratio = sequence_ratio(&business, &candidate);
    if candidate.contains(&business) {
        ratio.max(SUBSTRING_SCORE_FLOOR)
    } else {
        ratio
    }
}

/// Ratcliff/Obershelp similarity of two strings, in `[0, 1]`.
///
/// Two empty strings are identical (`1.0`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = BlockMatcher::new(&a, &b).matched_len();
    // Lengths of display names are far below f64's exact-integer range.
    (2 * matched) as f64 / total as f64
}

struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each character of `b`, ascending.
    b_index: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b_index.entry(c).or_default().push(j);
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b_index.retain(|_, positions| positions.len() <= limit);
        }
        Self { a, b, b_index }
    }

    /// Total length of all matching blocks.
    fn matched_len(&self) -> usize {
        let mut total = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }
        total
    }

    /// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as
    /// `(start_in_a, start_in_b, len)`.
    ///
    /// Among equally long blocks the one starting earliest in `a` wins, then
    /// the one starting earliest in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);
        // run_len[j] = length of the common block ending at a[i-1], b[j]
        let mut run_len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_run_len = HashMap::new();
            if let Some(positions) = self.b_index.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_run_len.insert(j, k);
                    if k > best_len {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_len = k;
                    }
                }
            }
            run_len = next_run_len;
        }

        // Extend across characters pruned from the index.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_len += 1;
        }
        while best_i + best_len < ahi
            && best_j + best_len < bhi
            && self.a[best_i + best_len] == self.b[best_j + best_len]
        {
            best_len += 1;
        }

        (best_i, best_j, best_len)
    }
}
