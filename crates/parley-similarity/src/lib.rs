//! Fuzzy word similarity for tolerating near-misspellings.
//!
//! The similarity of two strings is the matching ratio
//! `2 * M / (len(a) + len(b))`, where `M` is the length of the longest common
//! subsequence of their characters. Identical strings score 1.0, strings with
//! no character in common score 0.0, and the ratio is symmetric.

/// Ratio at or above which two words are treated as the same word.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Matching ratio between `a` and `b`, compared case-insensitively.
///
/// Lengths are counted in characters, not bytes. Two empty strings are
/// identical (1.0); an empty string against a non-empty one scores 0.0.
///
/// # Examples
///
/// ```
/// use parley_similarity::ratio;
///
/// assert_eq!(ratio("car", "CAR"), 1.0);
/// assert!((ratio("car", "care") - 6.0 / 7.0).abs() < 1e-12);
/// ```
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    2.0 * lcs_len(&a, &b) as f64 / total as f64
}

/// Whether `a` and `b` are similar at the given threshold.
pub fn similar(a: &str, b: &str, threshold: f64) -> bool {
    a == b || ratio(a, b) >= threshold
}

/// Whether `a` and `b` are similar at [`DEFAULT_THRESHOLD`].
pub fn similar_default(a: &str, b: &str) -> bool {
    similar(a, b, DEFAULT_THRESHOLD)
}

/// Length of the longest common subsequence, two-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
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
