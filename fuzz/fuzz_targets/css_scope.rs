#![no_main]

use css::{ScopeConfig, extract_class_names, scope_css};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let config = ScopeConfig::default();
    let Ok(scoped) = scope_css(input, &config) else {
        return;
    };
    assert!(!scoped.class_map.is_empty());
    assert_eq!(scoped, scope_css(input, &config).unwrap());

    // The output is still in the supported subset and every class in it is scoped.
    let names = extract_class_names(&scoped.css).unwrap();
    for name in &names {
        assert!(name.starts_with(&config.class_prefix), "unscoped .{name}");
    }
});
