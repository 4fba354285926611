//! Fuzz target for the ingest pipeline.
//!
//! Checks that ingest and column analysis:
//! 1. Never panic on arbitrary bytes
//! 2. Leave the registry untouched when ingest fails
//! 3. Keep histogram counts equal to the number of present values

#![no_main]

use libfuzzer_sys::fuzz_target;
use tablescope::Tablescope;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let scope = Tablescope::new();
    let Ok(receipt) = scope.ingest(data) else {
        assert!(scope.registry().is_empty());
        return;
    };

    for field in &receipt.schema {
        let stats = scope
            .column_stats(&receipt.dataset_id, &field.name)
            .expect("column from schema exists");
        assert_eq!(stats.count + stats.missing_count, receipt.row_count);

        if let Ok(hist) = scope.column_histogram(&receipt.dataset_id, &field.name, Some(7)) {
            assert_eq!(hist.total(), stats.count);
        }
    }
});
