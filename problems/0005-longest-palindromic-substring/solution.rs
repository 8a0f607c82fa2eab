/// Expands around each of the 2n-1 centers; O(n^2).
pub fn longest_palindrome(s: String) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return String::new();
    }

    let expand = |mut lo: usize, mut hi: usize| -> (usize, usize) {
        // Caller guarantees chars[lo..=hi] is a palindrome.
        while lo > 0 && hi + 1 < chars.len() && chars[lo - 1] == chars[hi + 1] {
            lo -= 1;
            hi += 1;
        }
        (lo, hi)
    };

    let (mut best_lo, mut best_hi) = (0, 0);
    for center in 0..chars.len() {
        let mut candidates = vec![expand(center, center)];
        if center + 1 < chars.len() && chars[center] == chars[center + 1] {
            candidates.push(expand(center, center + 1));
        }
        for (lo, hi) in candidates {
            if hi - lo > best_hi - best_lo {
                best_lo = lo;
                best_hi = hi;
            }
        }
    }
    chars[best_lo..=best_hi].iter().collect()
}
