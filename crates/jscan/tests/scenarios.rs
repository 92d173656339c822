#![allow(missing_docs)]
//! The six input/pattern/bucket scenarios used as the crate's acceptance
//! table, each as its own `#[rstest]` case, plus a seventh covering
//! `allow_multiple_values` (spec.md §9), which the acceptance table itself
//! doesn't enumerate.

use jscan::{ANY_KEY, PatternEntry, ScanOptions, ValueKind, scan};
use rstest::rstest;

fn key(s: &str) -> PatternEntry {
    PatternEntry::Key(s.into())
}

#[rstest]
fn scenario_1_sibling_keys_and_array_index() {
    let input = br#"{"a":1,"b":[10,20,30]}"#;
    let patterns = vec![vec![key("a")], vec![key("b"), PatternEntry::Index(1)]];

    let buckets = scan(input, &patterns, ScanOptions::default()).unwrap();

    assert_eq!(buckets[0].len(), 1);
    assert_eq!((buckets[0][0].begin, buckets[0][0].end, buckets[0][0].kind), (5, 6, ValueKind::Number));
    assert_eq!(&input[5..6], b"1");

    assert_eq!(buckets[1].len(), 1);
    assert_eq!((buckets[1][0].begin, buckets[1][0].end, buckets[1][0].kind), (15, 17, ValueKind::Number));
    assert_eq!(&input[15..17], b"20");
}

#[rstest]
fn scenario_2_index_range_over_nested_arrays() {
    let input = br#"[[1,2],[3,4],[5,6]]"#;
    let patterns = vec![vec![
        PatternEntry::Range { start: 0, end: 1, open_ended: false },
        PatternEntry::Index(1),
    ]];

    let buckets = scan(input, &patterns, ScanOptions::default()).unwrap();

    assert_eq!(buckets[0].len(), 2);
    assert_eq!((buckets[0][0].begin, buckets[0][0].end, buckets[0][0].kind), (3, 4, ValueKind::Number));
    assert_eq!((buckets[0][1].begin, buckets[0][1].end, buckets[0][1].kind), (9, 10, ValueKind::Number));
    assert_eq!(&input[3..4], b"2");
    assert_eq!(&input[9..10], b"4");
}

#[rstest]
fn scenario_3_any_key_with_materialized_path() {
    let input = br#"{"x":{"y":true}}"#;
    let patterns = vec![vec![ANY_KEY, key("y")]];
    let options = ScanOptions { with_path: true, ..Default::default() };

    let buckets = scan(input, &patterns, options).unwrap();

    assert_eq!(buckets[0].len(), 1);
    let m = &buckets[0][0];
    assert_eq!(m.kind, ValueKind::Boolean);
    assert_eq!(m.end - m.begin, 4);
    let path = m.path.as_ref().expect("with_path was set");
    let keys: Vec<&str> = path
        .iter()
        .map(|p| match p {
            jscan::PathElement::Key(k) => k.as_str(),
            jscan::PathElement::Index(_) => panic!("expected only keys"),
        })
        .collect();
    assert_eq!(keys, ["x", "y"]);
}

#[rstest]
fn scenario_4_empty_pattern_matches_root_array() {
    let input = b"[]";
    let patterns = vec![vec![]];

    let buckets = scan(input, &patterns, ScanOptions::default()).unwrap();

    assert_eq!(buckets[0].len(), 1);
    let m = &buckets[0][0];
    assert_eq!((m.begin, m.end, m.kind), (0, 2, ValueKind::Array));
}

#[rstest]
fn scenario_5_parse_error_reports_message_and_offset() {
    let input = b"not json";
    let patterns: Vec<Vec<PatternEntry>> = vec![vec![]];

    let err = scan(input, &patterns, ScanOptions::default()).unwrap_err();

    match err {
        jscan::Error::Scan(scan_error) => {
            assert!(!scan_error.message.is_empty());
            assert!(scan_error.bytes_consumed <= input.len() as u64);
        }
        jscan::Error::Compile(_) => panic!("expected a scan error, not a compile error"),
    }
}

#[rstest]
fn scenario_6_nested_object_span() {
    // The span of the "a" object: starts at its own `{` (byte 5) and ends
    // just past its closing `}` (byte 18). The scan driver computes this
    // from the tokenizer's own `bytes_consumed` convention, which is the
    // authority here over hand count-and-check arithmetic.
    let input = br#"{"a":{"b":1,"c":2}}"#;
    let patterns = vec![vec![key("a")]];

    let buckets = scan(input, &patterns, ScanOptions::default()).unwrap();

    assert_eq!(buckets[0].len(), 1);
    let m = &buckets[0][0];
    assert_eq!(m.kind, ValueKind::Object);
    assert_eq!(m.begin, 5);
    assert_eq!(&input[m.begin as usize..m.end as usize], br#"{"b":1,"c":2}"#);
}

#[rstest]
fn scenario_7_multiple_top_level_values_accumulate_per_value() {
    // spec.md §9: "the emitter behavior in §4.3 is well-defined in this
    // case (the empty pattern matches once per top-level value); test
    // suites should cover it even though the original source does not
    // explicitly document it."
    let input = br#"{"a":1} {"a":2} {"a":3}"#;
    let key_pattern = vec![vec![key("a")]];
    let root_pattern: Vec<Vec<PatternEntry>> = vec![vec![]];
    let options = ScanOptions { allow_multiple_values: true, ..Default::default() };

    let key_buckets = scan(input, &key_pattern, options).unwrap();
    assert_eq!(key_buckets[0].len(), 3);
    for (m, expected) in key_buckets[0].iter().zip([b'1', b'2', b'3']) {
        assert_eq!(m.kind, ValueKind::Number);
        assert_eq!(&input[m.begin as usize..m.end as usize], &[expected]);
    }

    // The root pattern (`[]`) matches once per top-level value too: depth
    // returns to zero between values, so each one is its own "root".
    let root_buckets = scan(input, &root_pattern, options).unwrap();
    assert_eq!(root_buckets[0].len(), 3);
    assert_eq!(root_buckets[0][0].kind, ValueKind::Object);
    assert_eq!(
        &input[root_buckets[0][0].begin as usize..root_buckets[0][0].end as usize],
        br#"{"a":1}"#
    );
    assert_eq!(
        &input[root_buckets[0][2].begin as usize..root_buckets[0][2].end as usize],
        br#"{"a":3}"#
    );
}
