#![no_main]

use libfuzzer_sys::fuzz_target;
use quicklook::config::ConfigLoader;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml) = std::str::from_utf8(data) {
        // Only panics matter; every error is an acceptable outcome
        let _ = ConfigLoader::with_defaults().load_from_str(yaml);
    }
});
