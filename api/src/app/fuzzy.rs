//! Fuzzy string matching
//!
//! InDel-based similarity on Unicode scalar values:
//! - `ratio`: `100 * 2 * LCS / (len_a + len_b)`
//! - `partial_ratio`: best `ratio` of the shorter string against any equally
//!   long window of the longer one, including windows cut off by either end
//!
//! The LCS is computed bit-parallel over the shorter string (Hyyrö), so one
//! window costs `O(window * ceil(needle / 64))` instead of `O(window * needle)`.

use std::collections::HashMap;

/// Best similarity of the shorter string against a substring of the longer one
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.len() == b.len() {
        return partial_ratio_chars(&a, &b).max(partial_ratio_chars(&b, &a));
    }
    if a.len() < b.len() {
        partial_ratio_chars(&a, &b)
    } else {
        partial_ratio_chars(&b, &a)
    }
}

/// Precomputed match masks for one side of an LCS computation
struct Pattern {
    /// Bit `i` of a char's mask is set when `pattern[i]` is that char
    masks: HashMap<char, Vec<u64>>,
    len: usize,
    words: usize,
}

impl Pattern {
    fn new(chars: &[char]) -> Self {
        let words = chars.len().div_ceil(64).max(1);
        let mut masks: HashMap<char, Vec<u64>> = HashMap::new();
        for (i, &c) in chars.iter().enumerate() {
            masks.entry(c).or_insert_with(|| vec![0; words])[i / 64] |= 1 << (i % 64);
        }
        Self {
            masks,
            len: chars.len(),
            words,
        }
    }

    fn contains(&self, c: char) -> bool {
        self.masks.contains_key(&c)
    }

    /// Length of the longest common subsequence with `text`
    fn lcs(&self, text: &[char]) -> usize {
        if self.len == 0 {
            return 0;
        }

        let mut v = vec![u64::MAX; self.words];
        for c in text {
            let Some(mask) = self.masks.get(c) else {
                continue;
            };
            let mut carry = false;
            for (word, &m) in v.iter_mut().zip(mask) {
                let u = *word & m;
                let (sum, c1) = word.overflowing_add(u);
                let (sum, c2) = sum.overflowing_add(carry as u64);
                carry = c1 || c2;
                *word = sum | (*word & !m);
            }
        }

        // Each cleared bit within the pattern length is one matched char
        let full = self.len / 64;
        let mut lcs: usize = v[..full].iter().map(|w| w.count_zeros() as usize).sum();
        let rest = self.len % 64;
        if rest > 0 {
            let live = (1u64 << rest) - 1;
            lcs += (!v[full] & live).count_ones() as usize;
        }
        lcs
    }

    /// Normalized InDel similarity in `0..=100`
    fn ratio(&self, text: &[char]) -> f64 {
        let total = self.len + text.len();
        if total == 0 {
            return 100.0;
        }
        100.0 * 2.0 * self.lcs(text) as f64 / total as f64
    }
}

/// `needle` must not be longer than `haystack`
fn partial_ratio_chars(needle: &[char], haystack: &[char]) -> f64 {
    let m = needle.len();
    let n = haystack.len();

    if m == 0 {
        return if n == 0 { 100.0 } else { 0.0 };
    }
    if haystack.windows(m).any(|w| w == needle) {
        return 100.0;
    }

    let pattern = Pattern::new(needle);
    let mut best = 0.0f64;

    // Windows hanging off the start
    for end in 1..m {
        if pattern.contains(haystack[end - 1]) {
            best = best.max(pattern.ratio(&haystack[..end]));
        }
    }

    // Full-length windows. A window whose first or last char is foreign to the
    // needle never beats its neighbour, so it is skipped.
    for start in 0..=(n - m) {
        let window = &haystack[start..start + m];
        if !pattern.contains(window[0]) || !pattern.contains(window[m - 1]) {
            continue;
        }
        best = best.max(pattern.ratio(window));
        if best >= 100.0 {
            return 100.0;
        }
    }

    // Windows hanging off the end
    for start in (n - m + 1)..n {
        if pattern.contains(haystack[start]) {
            best = best.max(pattern.ratio(&haystack[start..]));
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn ratio(a: &str, b: &str) -> f64 {
        Pattern::new(&chars(a)).ratio(&chars(b))
    }

    fn lcs(a: &str, b: &str) -> usize {
        Pattern::new(&chars(a)).lcs(&chars(b))
    }

    /// Textbook dynamic-programming LCS to check the bit-parallel one against
    fn lcs_table(a: &[char], b: &[char]) -> usize {
        let mut prev = vec![0usize; b.len() + 1];
        let mut curr = vec![0usize; b.len() + 1];
        for &ca in a {
            for (j, &cb) in b.iter().enumerate() {
                curr[j + 1] = if ca == cb {
                    prev[j] + 1
                } else {
                    prev[j + 1].max(curr[j])
                };
            }
            std::mem::swap(&mut prev, &mut curr);
        }
        prev[b.len()]
    }

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn ratio_basics() {
        approx(ratio("", ""), 100.0);
        approx(ratio("abc", ""), 0.0);
        approx(ratio("", "abc"), 0.0);
        approx(ratio("abc", "abc"), 100.0);
        // lcs("abcd", "abed") = 3 -> 2*3/8
        approx(ratio("abcd", "abed"), 75.0);
    }

    #[test]
    fn lcs_handles_interleaving() {
        assert_eq!(lcs("AGGTAB", "GXTXAYB"), 4);
        assert_eq!(lcs("GXTXAYB", "AGGTAB"), 4);
        assert_eq!(lcs("fuzzy wuzzy was a bear", "wuzzy fuzzy was a bear"), 20);
    }

    #[test]
    fn lcs_matches_table_past_one_word() {
        // Patterns longer than 64 chars need the carry between words
        let a: String = (0..150)
            .map(|i| char::from(b'a' + ((i * 7 + i / 5) % 11) as u8))
            .collect();
        let b: String = (0..200)
            .map(|i| char::from(b'a' + ((i * 5 + i / 3) % 13) as u8))
            .collect();
        let (a, b) = (chars(&a), chars(&b));

        assert_eq!(Pattern::new(&a).lcs(&b), lcs_table(&a, &b));
        assert_eq!(Pattern::new(&b).lcs(&a), lcs_table(&b, &a));
        assert_eq!(Pattern::new(&a[..64]).lcs(&b), lcs_table(&a[..64], &b));
        assert_eq!(Pattern::new(&a[..65]).lcs(&b), lcs_table(&a[..65], &b));
    }

    #[test]
    fn fuzzy_wuzzy_reference_value() {
        // best window drops one char: lcs 20 over 22 + 21 chars
        approx(
            partial_ratio("fuzzy wuzzy was a bear", "wuzzy fuzzy was a bear"),
            2.0 * 20.0 / 43.0 * 100.0,
        );
    }

    #[test]
    fn substring_is_a_perfect_partial_match() {
        approx(partial_ratio("this is a test", "this is a test!"), 100.0);
        approx(partial_ratio("password", "how to reset your password today"), 100.0);
        approx(partial_ratio("how to reset your password today", "password"), 100.0);
    }

    #[test]
    fn empty_inputs() {
        approx(partial_ratio("", ""), 100.0);
        approx(partial_ratio("", "abc"), 0.0);
        approx(partial_ratio("abc", ""), 0.0);
    }

    #[test]
    fn one_typo_stays_above_threshold() {
        // best window "passwor" shares 6 of 7 chars: 2*6/14
        let score = partial_ratio("pasword", "reset your password");
        approx(score, 2.0 * 6.0 / 14.0 * 100.0);
    }

    #[test]
    fn unrelated_text_scores_low() {
        let score = partial_ratio("invoice", "shipping schedule for warehouses");
        assert!(score < 80.0, "score {}", score);
    }

    #[test]
    fn partial_windows_at_the_edges_count() {
        // best match hangs off the end of the haystack: "xyzab" ends with "ab"
        approx(partial_ratio("abq", "xyzab"), 80.0);
        // and off the start
        approx(partial_ratio("qab", "abxyz"), 80.0);
    }

    #[test]
    fn symmetric_for_equal_lengths() {
        approx(partial_ratio("abcd", "dabc"), partial_ratio("dabc", "abcd"));
    }

    #[test]
    fn unicode_is_compared_by_character() {
        approx(partial_ratio("café", "le café noir"), 100.0);
    }

    #[test]
    fn long_needle_against_large_text_finishes() {
        let needle: String = "configure the retention window ".repeat(8);
        let haystack: String = "orders ship from our warehouse within two days. ".repeat(500);

        let started = std::time::Instant::now();
        let score = partial_ratio(&needle, &haystack);
        assert!(score < 80.0, "score {}", score);
        assert!(started.elapsed() < std::time::Duration::from_secs(30));
    }
}
