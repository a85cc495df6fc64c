// tests/normalize_properties.rs
use follow_benford::model::{RawValue, Reason};
use follow_benford::normalize::{normalize, normalize_str, NormalizedCount, SENTINELS};

use NormalizedCount::{Missing, Value};

const MIXED: &[&str] = &[
    "1,234", "1.234", "12.3K", "2.5M", "987", "", "  ", "PRIVADA", "no_existe",
    "TIMEOUT", "ERROR_DESCONOCIDO", "NO_ENCONTRADO", "abc", "-12", "0", "0.4K",
    "1e3", "7k", "3 M", "4.567.890",
];

#[test]
fn normalizing_twice_changes_nothing() {
    for cell in MIXED {
        let once = normalize_str(cell);
        let twice = normalize_str(&once.to_string());
        assert_eq!(once, twice, "cell {cell:?}");
    }
}

#[test]
fn every_sentinel_collapses_to_missing() {
    for s in SENTINELS {
        assert_eq!(normalize_str(s), Missing);
        assert_eq!(normalize_str(&format!("  {} ", s.to_lowercase())), Missing);
    }
    for r in Reason::ALL {
        assert_eq!(normalize_str(r.sentinel()), Missing, "{r}");
    }
}

#[test]
fn results_are_positive_or_missing() {
    for cell in MIXED {
        match normalize_str(cell) {
            Value(n) => assert!(n >= 1, "cell {cell:?} gave {n}"),
            Missing => {}
        }
    }
}

#[test]
fn suffixes_scale_before_dots_are_stripped() {
    assert_eq!(normalize_str("12.3K"), Value(12_300));
    assert_eq!(normalize_str("2.5M"), Value(2_500_000));
    assert_eq!(normalize_str("4.567.890"), Value(4_567_890));
    assert_eq!(normalize_str("0.4K"), Value(400));
}

#[test]
fn numeric_inputs_truncate() {
    assert_eq!(normalize(&RawValue::from(12.9)), Value(12));
    assert_eq!(normalize(&RawValue::from(42_i64)), Value(42));
    assert_eq!(normalize(&RawValue::Numeric(f64::NAN)), Missing);
    assert_eq!(normalize(&RawValue::Numeric(f64::INFINITY)), Missing);
    assert_eq!(normalize(&RawValue::Numeric(0.99)), Missing);
}

#[test]
fn text_that_is_not_a_number_is_missing() {
    for cell in ["abc", "K", "M", "..", "1-2", "--5", "12 34x"] {
        assert_eq!(normalize_str(cell), Missing, "cell {cell:?}");
    }
    assert_eq!(normalize(&RawValue::Empty), Missing);
    assert_eq!(normalize(&RawValue::from(None::<&str>)), Missing);
}
