#![no_main]

use clap::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut args = Vec::new();
        args.push("embench".to_owned());
        for token in input.split_whitespace().take(64) {
            args.push(token.to_owned());
        }
        let arg_refs: Vec<&str> = args.iter().map(|value| value.as_str()).collect();
        if let Ok(parsed) = embench::args::BenchArgs::try_parse_from(arg_refs) {
            if let Some(requests) = parsed.requests {
                debug_assert!(requests.get() >= 1);
            }
            if let Some(concurrent) = parsed.concurrent {
                debug_assert!(concurrent.get() >= 1);
            }
            if let Some(timeout) = parsed.timeout {
                debug_assert!(timeout.as_millis() > 0);
            }
        }
    }
});
