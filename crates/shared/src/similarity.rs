//! Gestalt (Ratcliff/Obershelp) string-similarity ratio.
//!
//! Used as a password-weakness heuristic: a candidate password that is too
//! similar to the account's email local part or first name is rejected.
//! The ratio is `2 * M / (len(a) + len(b))` where `M` is the total length of
//! the longest common contiguous matching blocks, found recursively on both
//! sides of each match. This matches the classic sequence-matcher definition
//! (it is a similarity measure, not an edit distance).

/// Finds the longest common contiguous block between two char slices.
///
/// Returns `(start_a, start_b, len)` of the first longest match.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_len) = (0, 0, 0);

    // j2len[j] = length of the common run ending at (i-1, j-1)
    let mut j2len = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        let mut new_j2len = vec![0usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                let k = j2len[j] + 1;
                new_j2len[j + 1] = k;
                if k > best_len {
                    best_len = k;
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                }
            }
        }
        j2len = new_j2len;
    }

    (best_i, best_j, best_len)
}

/// Total length of all matching blocks between `a` and `b`.
fn matching_total(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (i, j, len) = longest_match(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_total(&a[..i], &b[..j]) + matching_total(&a[i + len..], &b[j + len..])
}

/// Similarity ratio in `[0, 1]` between two strings.
///
/// `1.0` means identical, `0.0` means no common characters. Comparison is
/// case-sensitive, matching the behavior the password policy was defined
/// against.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_total(&a, &b) as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(similarity_ratio("alice", "alice"), 1.0);
    }

    #[test]
    fn test_disjoint_strings() {
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(similarity_ratio("", ""), 1.0);
        assert_eq!(similarity_ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_alice_password() {
        // 2 * 5 / (5 + 8) ≈ 0.769, well over the 0.5 policy threshold
        let ratio = similarity_ratio("alice", "alice123");
        assert!((ratio - 10.0 / 13.0).abs() < 1e-9);
        assert!(ratio >= 0.5);
    }

    #[test]
    fn test_email_local_part() {
        // 2 * 3 / (3 + 8) ≈ 0.545
        let ratio = similarity_ratio("abc", "abc12345");
        assert!((ratio - 6.0 / 11.0).abs() < 1e-9);
        assert!(ratio >= 0.5);
    }

    #[test]
    fn test_unrelated_password_is_below_threshold() {
        assert!(similarity_ratio("alice", "correct horse battery") < 0.5);
    }

    #[test]
    fn test_case_sensitive() {
        assert!(similarity_ratio("ALICE", "alice") < 1.0);
    }

    #[test]
    fn test_recursive_blocks_counted() {
        // "ab" and "cd" match around the non-matching middle
        let ratio = similarity_ratio("abxcd", "abycd");
        assert!((ratio - 8.0 / 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_enough_for_threshold_use() {
        let r1 = similarity_ratio("alice", "alice123");
        let r2 = similarity_ratio("alice123", "alice");
        assert!((r1 - r2).abs() < 1e-9);
    }
}
