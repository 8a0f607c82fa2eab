/// k-th smallest (1-based) of two sorted slices, discarding k/2 elements per step.
fn kth(mut a: &[i32], mut b: &[i32], mut k: usize) -> i32 {
    loop {
        if a.is_empty() {
            return b[k - 1];
        }
        if b.is_empty() {
            return a[k - 1];
        }
        if k == 1 {
            return a[0].min(b[0]);
        }
        let half = k / 2;
        let i = a.len().min(half);
        let j = b.len().min(half);
        if a[i - 1] < b[j - 1] {
            a = &a[i..];
            k -= i;
        } else {
            b = &b[j..];
            k -= j;
        }
    }
}

pub fn find_median_sorted_arrays(nums1: Vec<i32>, nums2: Vec<i32>) -> f64 {
    let total = nums1.len() + nums2.len();
    let mid = total / 2;
    if total % 2 == 1 {
        f64::from(kth(&nums1, &nums2, mid + 1))
    } else {
        (f64::from(kth(&nums1, &nums2, mid)) + f64::from(kth(&nums1, &nums2, mid + 1))) / 2.0
    }
}
