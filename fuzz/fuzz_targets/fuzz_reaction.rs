#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Malformed reaction strings must come back as errors, never panics
    if let Ok(measurement) = exfor::reaction::Measurement::parse(text) {
        let _ = measurement.exfor_style();
        let _ = measurement.equation(true);
        let _ = exfor::dataset::QuantityClass::of(&measurement);
        for reaction in measurement.reactions() {
            let _ = reaction.process.balance();
        }
    }
});
