#![no_main]

use libfuzzer_sys::fuzz_target;
use embench::config::types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    let parsed: Option<ConfigFile> = serde_json::from_slice(data).ok();
    let applied = embench::fuzzing::apply_config_from_json(data);
    if applied.is_ok() {
        if let Some(config) = parsed {
            if let Some(requests) = config.requests {
                debug_assert!(requests >= 1);
            }
            if let Some(concurrent) = config.concurrent {
                debug_assert!(concurrent >= 1);
            }
        }
    }
});
