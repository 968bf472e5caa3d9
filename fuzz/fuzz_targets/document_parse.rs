#![no_main]

//! Fuzz target for swagger document parsing.
//!
//! Arbitrary JSON must either fail to parse or yield a document that serializes back.

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(doc) = serde_json::from_str::<kubeschema_types::SwaggerDocument>(s) {
        assert!(serde_json::to_string(&doc).is_ok());
    }

    let _ = serde_json::from_str::<kubeschema_types::RawDefinition>(s);
    let _ = serde_json::from_str::<kubeschema_types::RawPropertySchema>(s);
});
