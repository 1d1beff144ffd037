use chrono::{TimeZone, Utc};
use osd::binary::{self, BinaryOptions};
use osd::{Osd, OsdArray, OsdError, OsdMap};
use uuid::Uuid;

#[test]
fn encodes_known_layout() {
    let map = OsdMap::new();
    map.insert("a", 1);
    let bytes = binary::serialize_with(&Osd::from(map), BinaryOptions { header: false });
    assert_eq!(
        bytes,
        [
            b'{', 0, 0, 0, 1, //
            b'k', 0, 0, 0, 1, b'a', //
            b'i', 0, 0, 0, 1, //
            b'}',
        ]
    );
}

#[test]
fn header_is_written_and_optional_on_decode() {
    let with_header = binary::serialize(&Osd::Boolean(true));
    assert_eq!(with_header, b"<? llsd/binary ?>\n1");
    assert_eq!(binary::deserialize(&with_header).unwrap(), Osd::Boolean(true));
    assert_eq!(binary::deserialize(b"0").unwrap(), Osd::Boolean(false));
}

#[test]
fn round_trips_every_scalar() {
    let date = Utc.with_ymd_and_hms(2021, 6, 1, 12, 30, 0).unwrap();
    let id = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
    let array = OsdArray::from(vec![
        Osd::Undefined,
        Osd::Boolean(false),
        Osd::Integer(-123),
        Osd::Real(0.25),
        Osd::from("héllo"),
        Osd::Uuid(id),
        Osd::Date(date),
        Osd::from_uri("http://example.com/cap"),
        Osd::Binary(vec![0, 255, 7]),
    ]);
    let value = Osd::from(array);
    assert_eq!(binary::deserialize(&binary::serialize(&value)).unwrap(), value);
}

#[test]
fn date_seconds_are_little_endian() {
    let date = Utc.timestamp_opt(1, 0).unwrap();
    let bytes = binary::serialize_with(&Osd::Date(date), BinaryOptions { header: false });
    let mut expected = vec![b'd'];
    expected.extend_from_slice(&1.0f64.to_le_bytes());
    assert_eq!(bytes, expected);
}

#[test]
fn wide_integers_travel_as_reals() {
    let big = i64::from(i32::MAX) + 1;
    let bytes = binary::serialize_with(&Osd::Integer(big), BinaryOptions { header: false });
    assert_eq!(bytes[0], b'r');
    let back = binary::deserialize(&bytes).unwrap();
    assert_eq!(back.as_integer(), big);
}

#[test]
fn wide_integers_are_exact_only_to_f64_precision() {
    let low = i64::from(i32::MIN) - 1;
    let back = binary::deserialize(&binary::serialize(&Osd::Integer(low))).unwrap();
    assert_eq!(back.as_integer(), low);

    let exact = 1_i64 << 53;
    let back = binary::deserialize(&binary::serialize(&Osd::Integer(exact))).unwrap();
    assert_eq!(back.as_integer(), exact);

    let back = binary::deserialize(&binary::serialize(&Osd::Integer(exact + 1))).unwrap();
    assert_eq!(back, Osd::Real(9_007_199_254_740_992.0));
    assert_eq!(back.as_integer(), exact);
}

#[test]
fn truncated_input_is_an_error() {
    let bytes = binary::serialize(&Osd::from("truncated"));
    let result = binary::deserialize(&bytes[..bytes.len() - 3]);
    assert!(matches!(result, Err(OsdError::UnexpectedEof)));
    assert!(binary::deserialize(b"").is_err());
}

#[test]
fn bad_markers_are_malformed() {
    assert!(matches!(binary::deserialize(b"x"), Err(OsdError::Malformed(_))));
    // Array that claims one element but closes with a map marker.
    let bytes = [b'[', 0, 0, 0, 1, b'!', b'}'];
    assert!(matches!(binary::deserialize(&bytes), Err(OsdError::Malformed(_))));
}

#[test]
fn huge_counts_do_not_preallocate() {
    let bytes = [b'[', 0xff, 0xff, 0xff, 0xff, b'!'];
    assert!(binary::deserialize(&bytes).is_err());
}

fn nested_arrays(levels: usize) -> Osd {
    let mut value = Osd::Integer(1);
    for _ in 0..levels {
        value = Osd::from(OsdArray::from(vec![value]));
    }
    value
}

#[test]
fn nesting_up_to_the_limit_decodes() {
    let value = nested_arrays(osd::MAX_DEPTH);
    assert_eq!(binary::deserialize(&binary::serialize(&value)).unwrap(), value);

    let too_deep = binary::serialize(&nested_arrays(osd::MAX_DEPTH + 1));
    let err = binary::deserialize(&too_deep).unwrap_err();
    assert!(err.to_string().contains("nesting too deep"), "{err}");
}

#[test]
fn hostile_nesting_is_rejected() {
    let bytes = b"[\0\0\0\x01".repeat(200_000);
    assert!(matches!(binary::deserialize(&bytes), Err(OsdError::Malformed(_))));
}
