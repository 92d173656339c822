#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use jscan::{PatternEntry, ScanOptions, compile, scan};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

/// A JSON value generator biased toward syntactically valid documents, so
/// most fuzzer inputs actually exercise the tokenizer's happy path rather
/// than its error paths.
#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(21)?;
        let value = match node_type {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => return Err(arbitrary::Error::IncorrectFormat),
        };
        Ok(ArbitraryValue(value))
    }
}

/// One arbitrary pattern entry, hand-rolled since [`PatternEntry`] has no
/// `Arbitrary` impl of its own (it carries an owned `BString`, which the
/// public API has no reason to make fuzzer-constructible).
fn arbitrary_entry(u: &mut Unstructured<'_>) -> arbitrary::Result<PatternEntry> {
    Ok(match u.choose_index(4)? {
        0 => PatternEntry::Key(u.arbitrary::<String>()?.into_bytes().into()),
        1 => PatternEntry::Index(u.int_in_range(0..=64)?),
        2 => PatternEntry::AnyKey,
        _ => PatternEntry::Range {
            start: u.int_in_range(0..=16)?,
            end: u.int_in_range(-1..=32)?,
            open_ended: u.arbitrary()?,
        },
    })
}

fn arbitrary_patterns(u: &mut Unstructured<'_>) -> arbitrary::Result<Vec<Vec<PatternEntry>>> {
    let pattern_count = u.int_in_range(0..=4)?;
    let mut patterns = Vec::with_capacity(pattern_count);
    for _ in 0..pattern_count {
        let len = u.int_in_range(0..=4)?;
        let mut pattern = Vec::with_capacity(len);
        for _ in 0..len {
            pattern.push(arbitrary_entry(u)?);
        }
        patterns.push(pattern);
    }
    Ok(patterns)
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);

    let Ok(patterns) = arbitrary_patterns(&mut u) else {
        return;
    };
    let Ok(compiled) = compile(&patterns) else {
        // Only reachable for out-of-range `Range` entries; not a crash.
        return;
    };

    // Half the corpus is a structured, syntactically-valid JSON document;
    // the rest is whatever bytes remain, to exercise the tokenizer's error
    // paths too.
    let input = match ArbitraryValue::arbitrary_take_rest(u) {
        Ok(value) => serde_json::to_vec(&value.0).expect("serializing an arbitrary Value"),
        Err(_) => data.to_vec(),
    };

    let options = ScanOptions {
        with_path: true,
        symbolize_path_keys: true,
        allow_comments: true,
        allow_trailing_garbage: true,
        allow_multiple_values: true,
        allow_partial_values: true,
        ..ScanOptions::default()
    };

    // Never materializes a value, never panics: a parse error or a
    // compile error are both fine outcomes, a panic is not.
    let _ = scan(&input, &compiled, options);
});
