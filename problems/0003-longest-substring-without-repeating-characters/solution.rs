use std::collections::HashMap;

/// Sliding window over chars; `left` jumps past the previous occurrence of a repeat.
pub fn length_of_longest_substring(s: String) -> i32 {
    let mut last_seen: HashMap<char, usize> = HashMap::new();
    let mut left = 0;
    let mut best = 0;
    for (right, c) in s.chars().enumerate() {
        if let Some(&prev) = last_seen.get(&c) {
            left = left.max(prev + 1);
        }
        last_seen.insert(c, right);
        best = best.max(right + 1 - left);
    }
    best as i32
}
