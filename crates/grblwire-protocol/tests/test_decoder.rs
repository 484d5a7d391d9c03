use grblwire_protocol::{axis_values_string, read_float};
use grblwire_core::ReportUnits;
use proptest::prelude::*;

fn relative_error(actual: f32, expected: f64) -> f64 {
    let diff = (f64::from(actual) - expected).abs();
    if expected == 0.0 {
        diff
    } else {
        diff / expected.abs()
    }
}

#[test]
fn test_decode_word_value_stops_at_space() {
    let line = b"X12.345 Y1";
    let field = read_float(line, 1).unwrap();
    assert!((field.value - 12.345).abs() < 1e-5);
    assert_eq!(field.end, 7);
    assert_eq!(line[field.end], b' ');
}

#[test]
fn test_decode_walks_a_command_line() {
    let line = b"G1X-1.5Y2F300";
    let mut values = Vec::new();
    let mut cursor = 0;
    while cursor < line.len() {
        let letter = line[cursor];
        let field = read_float(line, cursor + 1).unwrap();
        values.push((letter as char, field.value));
        cursor = field.end;
    }
    assert_eq!(
        values,
        vec![('G', 1.0), ('X', -1.5), ('Y', 2.0), ('F', 300.0)]
    );
}

#[test]
fn test_decode_failures_map_to_bad_number_format() {
    for input in [&b""[..], b"+", b"-", b"abc", b"."] {
        let err = read_float(input, 0).unwrap_err();
        assert_eq!(err.status_code().code(), 2, "input {:?}", input);
    }
}

proptest! {
    #[test]
    fn decodes_plain_numerals(
        negative in any::<bool>(),
        int_part in 0u32..10_000,
        frac_part in 0u32..1_000,
    ) {
        let text = format!("{}{}.{:03}", if negative { "-" } else { "" }, int_part, frac_part);
        let expected: f64 = text.parse().unwrap();

        let field = read_float(text.as_bytes(), 0).unwrap();
        prop_assert_eq!(field.end, text.len());
        prop_assert!(relative_error(field.value, expected) < 1e-6);
    }

    #[test]
    fn stops_at_first_non_numeric(value in 0u32..100_000, tail in "[A-Z ]") {
        let text = format!("{}{}", value, tail);
        let field = read_float(text.as_bytes(), 0).unwrap();
        prop_assert_eq!(field.end, text.len() - 1);
        prop_assert!(relative_error(field.value, f64::from(value)) < 1e-6);
    }

    #[test]
    fn rejects_input_without_digits(text in "[A-Za-z +\\-]{0,6}") {
        prop_assert!(read_float(text.as_bytes(), 0).is_err());
    }

    #[test]
    fn axis_vector_has_one_separator_per_gap(
        values in proptest::collection::vec(-10_000.0f32..10_000.0, 1..8),
        imperial in any::<bool>(),
    ) {
        let units = if imperial { ReportUnits::Imperial } else { ReportUnits::Metric };
        let text = axis_values_string(&values, units);
        let fields: Vec<&str> = text.split(',').collect();

        prop_assert_eq!(fields.len(), values.len());
        let decimals = if imperial { 4 } else { 3 };
        for field in fields {
            let (_, fraction) = field.split_once('.').unwrap();
            prop_assert_eq!(fraction.len(), decimals);
        }
    }
}
