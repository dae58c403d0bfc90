#![no_main]

use arbitrary::Arbitrary;
use dropfinder::query::{FuzzyPattern, is_subsequence, match_positions};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    haystack: String,
    needle: String,
}

fuzz_target!(|input: Input| {
    let matched = is_subsequence(&input.haystack, &input.needle);
    assert_eq!(FuzzyPattern::new(&input.needle).matches(&input.haystack), matched);

    match match_positions(&input.haystack, &input.needle) {
        Some(positions) => {
            assert!(matched);
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
        None => assert!(!matched),
    }
});
