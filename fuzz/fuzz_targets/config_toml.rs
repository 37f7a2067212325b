#![no_main]

use libfuzzer_sys::fuzz_target;
use embench::config::types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let parsed: Option<ConfigFile> = toml::from_str(input).ok();
        let applied = embench::fuzzing::apply_config_from_toml(input);
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
    }
});
