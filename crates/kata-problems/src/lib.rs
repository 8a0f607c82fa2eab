//! Solutions live next to their descriptors under `problems/<dir>/solution.rs`
//! and are compiled in here. [`default_registry`] is the registration table the
//! harness dispatches through.

use kata_core::invoke::{SolutionModule, SolutionRegistry};

#[path = "../../../problems/0001-two-sum/solution.rs"]
pub mod p0001_two_sum;
#[path = "../../../problems/0002-add-two-numbers/solution.rs"]
pub mod p0002_add_two_numbers;
#[path = "../../../problems/0003-longest-substring-without-repeating-characters/solution.rs"]
pub mod p0003_longest_substring;
#[path = "../../../problems/0004-median-of-two-sorted-arrays/solution.rs"]
pub mod p0004_median_of_two_sorted_arrays;
#[path = "../../../problems/0005-longest-palindromic-substring/solution.rs"]
pub mod p0005_longest_palindromic_substring;
#[path = "../../../problems/0006-zigzag-conversion/solution.rs"]
pub mod p0006_zigzag_conversion;
#[path = "../../../problems/0007-reverse-integer/solution.rs"]
pub mod p0007_reverse_integer;
#[path = "../../../problems/0008-string-to-integer-atoi/solution.rs"]
pub mod p0008_string_to_integer_atoi;

/// Root of the problem corpus in this workspace.
pub fn corpus_root() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../problems")
}

pub fn default_registry() -> SolutionRegistry {
    let mut r = SolutionRegistry::new();
    r.register("0001-two-sum", || {
        SolutionModule::new("0001-two-sum").export("twoSum", p0001_two_sum::two_sum)
    })
    .register("0002-add-two-numbers", || {
        SolutionModule::new("0002-add-two-numbers")
            .export("addTwoNumbers", p0002_add_two_numbers::add_two_numbers)
    })
    .register("0003-longest-substring-without-repeating-characters", || {
        SolutionModule::new("0003-longest-substring-without-repeating-characters").export(
            "lengthOfLongestSubstring",
            p0003_longest_substring::length_of_longest_substring,
        )
    })
    .register("0004-median-of-two-sorted-arrays", || {
        SolutionModule::new("0004-median-of-two-sorted-arrays").export(
            "findMedianSortedArrays",
            p0004_median_of_two_sorted_arrays::find_median_sorted_arrays,
        )
    })
    .register("0005-longest-palindromic-substring", || {
        SolutionModule::new("0005-longest-palindromic-substring").export(
            "longestPalindrome",
            p0005_longest_palindromic_substring::longest_palindrome,
        )
    })
    .register("0006-zigzag-conversion", || {
        SolutionModule::new("0006-zigzag-conversion")
            .export("convert", p0006_zigzag_conversion::convert)
    })
    .register("0007-reverse-integer", || {
        SolutionModule::new("0007-reverse-integer")
            .export("reverse", p0007_reverse_integer::reverse)
    })
    .register("0008-string-to-integer-atoi", || {
        SolutionModule::new("0008-string-to-integer-atoi")
            .export("myAtoi", p0008_string_to_integer_atoi::my_atoi)
    });
    r
}
