use std::collections::HashMap;

/// Indices of the two numbers adding up to `target`, smaller index first.
pub fn two_sum(nums: Vec<i32>, target: i32) -> Vec<i32> {
    let mut seen: HashMap<i32, usize> = HashMap::with_capacity(nums.len());
    for (i, &num) in nums.iter().enumerate() {
        if let Some(&j) = seen.get(&(target - num)) {
            return vec![j as i32, i as i32];
        }
        seen.insert(num, i);
    }
    Vec::new()
}
