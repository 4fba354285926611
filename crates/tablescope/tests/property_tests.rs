//! Property-based tests for ingest and column analysis.
//!
//! These tests use proptest to generate random columns and CSV payloads and
//! verify that the analyzer's invariants hold for all of them.
//!
//! ```bash
//! PROPTEST_CASES=10000 cargo test -p tablescope --test property_tests
//! ```

use proptest::prelude::*;

use tablescope::{Tablescope, Value};

// =============================================================================
// Test Strategies
// =============================================================================

/// An integer column with some missing cells, rendered as CSV cells.
fn integer_cells() -> impl Strategy<Value = Vec<Option<i64>>> {
    prop::collection::vec(prop::option::weighted(0.8, -1000i64..1000), 1..60)
}

/// A float column with some missing cells.
fn float_cells() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.8, -1.0e6f64..1.0e6), 1..60)
}

/// Arbitrary printable payloads, including malformed CSV.
fn csv_like() -> impl Strategy<Value = String> {
    "[a-z0-9,\"\\n ]{0,200}"
}

fn render(cells: &[Option<String>]) -> String {
    let mut csv = String::from("v,row\n");
    for (i, cell) in cells.iter().enumerate() {
        csv.push_str(cell.as_deref().unwrap_or(""));
        csv.push(',');
        csv.push_str(&i.to_string());
        csv.push('\n');
    }
    csv
}

fn ingest(cells: Vec<Option<String>>) -> Tablescope {
    let scope = Tablescope::new();
    scope
        .ingest(render(&cells).as_bytes())
        .expect("generated CSV is well-formed");
    scope
}

fn as_f64(value: &Value) -> f64 {
    value.as_f64().expect("numeric value")
}

proptest! {
    /// min <= median <= max, and counts partition the column.
    #[test]
    fn numeric_stats_are_ordered(cells in integer_cells()) {
        let present = cells.iter().filter(|c| c.is_some()).count();
        let scope = ingest(cells.iter().map(|c| c.map(|v| v.to_string())).collect());
        let stats = scope.column_stats("1", "v").unwrap();

        prop_assert_eq!(stats.missing_count + stats.count, cells.len());
        prop_assert_eq!(stats.count, present);

        let numeric = stats.numeric.expect("integer or all-missing float column");
        if present > 0 {
            let min = as_f64(&numeric.min);
            let max = as_f64(&numeric.max);
            let median = numeric.median.unwrap();
            let mean = numeric.mean.unwrap();
            prop_assert!(min <= median && median <= max);
            prop_assert!(min <= mean + 1e-9 && mean <= max + 1e-9);
        } else {
            prop_assert!(numeric.mean.is_none());
            prop_assert!(numeric.min.is_missing());
        }
    }

    /// Histogram counts sum to the number of present values.
    #[test]
    fn histogram_counts_cover_present_values(cells in float_cells(), bins in 1usize..64) {
        let present = cells.iter().filter(|c| c.is_some()).count();
        let scope = ingest(cells.iter().map(|c| c.map(|v| format!("{:e}", v))).collect());

        let hist = scope.column_histogram("1", "v", Some(bins)).unwrap();
        prop_assert_eq!(hist.total(), present);
        if present > 0 {
            prop_assert_eq!(hist.bin_edges.len(), bins + 1);
            prop_assert_eq!(hist.counts.len(), bins);
            prop_assert!(hist.bin_edges.windows(2).all(|w| w[0] <= w[1]));
        } else {
            prop_assert!(hist.bin_edges.is_empty());
        }
    }

    /// The mode is a present value with maximal frequency, first in row order.
    #[test]
    fn mode_is_first_most_frequent(cells in prop::collection::vec(0i64..5, 1..40)) {
        let scope = ingest(cells.iter().map(|v| Some(v.to_string())).collect());
        let stats = scope.column_stats("1", "v").unwrap();

        let freq = |x: i64| cells.iter().filter(|&&c| c == x).count();
        let best = cells.iter().map(|&c| freq(c)).max().unwrap();
        let expected = cells.iter().copied().find(|&c| freq(c) == best).unwrap();

        prop_assert_eq!(stats.mode, Value::Integer(expected));
    }

    /// Ingest never panics, and a failed ingest leaves the registry unchanged.
    #[test]
    fn ingest_is_atomic(payload in csv_like()) {
        let scope = Tablescope::new();
        let result = scope.ingest(payload.as_bytes());

        match result {
            Ok(receipt) => {
                prop_assert_eq!(scope.registry().len(), 1);
                let table = scope.lookup(&receipt.dataset_id).unwrap();
                prop_assert!(table.columns().iter().all(|c| c.len() == table.row_count()));
            }
            Err(_) => prop_assert!(scope.registry().is_empty()),
        }
    }
}
