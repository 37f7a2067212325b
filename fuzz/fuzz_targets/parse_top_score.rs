#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Some(score) = embench::fuzzing::parse_top_score_input(data) {
        debug_assert!(score.is_finite());
    }
});
