#![no_main]

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use meetload::config::{AnalysisConfig, WorkWindow};
use meetload::ics::parse_ics_str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Ingestion must never panic; whatever parses must fold cleanly
        if let Ok(events) = parse_ics_str(input, chrono_tz::Europe::Stockholm) {
            let config = AnalysisConfig::new("name@example.org", WorkWindow::default())
                .expect("static config is valid");
            let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
            let _ = meetload::analyze(&events, &config, now);
        }
    }
});
