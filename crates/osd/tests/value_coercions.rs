use chrono::{TimeZone, Utc};
use osd::{Color4, Osd, OsdArray, OsdMap, OsdType, Quaternion, Vector3, Vector3d};
use uuid::Uuid;

fn every_variant() -> Vec<Osd> {
    let map = OsdMap::new();
    map.insert("k", 1);
    vec![
        Osd::Undefined,
        Osd::Boolean(true),
        Osd::Integer(-7),
        Osd::Real(f64::NAN),
        Osd::from("not a number"),
        Osd::Uuid(Uuid::from_u128(0x6b5c_7a96_2f4c_4b6e_9b6a_0c4a_5c6f_7e8d)),
        Osd::Date(Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap()),
        Osd::from_uri("http://example.com/"),
        Osd::Binary(vec![1, 2, 3]),
        Osd::Map(map),
        Osd::Array(OsdArray::from(vec![Osd::Integer(1)])),
        Osd::llsd_xml("<string>x</string>"),
    ]
}

#[test]
fn every_projection_is_total() {
    for value in every_variant() {
        let _ = value.as_boolean();
        let _ = value.as_integer();
        let _ = value.as_ulong();
        let _ = value.as_real();
        let _ = value.as_string();
        let _ = value.as_uuid();
        let _ = value.as_date();
        let _ = value.as_uri();
        let _ = value.as_binary();
        let _ = value.as_vector2();
        let _ = value.as_vector3();
        let _ = value.as_vector3d();
        let _ = value.as_vector4();
        let _ = value.as_quaternion();
        let _ = value.as_color4();
    }
}

#[test]
fn undefined_yields_defaults() {
    let value = Osd::Undefined;
    assert_eq!(value.osd_type(), OsdType::Unknown);
    assert!(!value.as_boolean());
    assert_eq!(value.as_integer(), 0);
    assert_eq!(value.as_real(), 0.0);
    assert_eq!(value.as_string(), "");
    assert_eq!(value.as_uuid(), Uuid::nil());
    assert_eq!(value.as_date().timestamp(), 0);
    assert!(value.as_binary().is_empty());
    assert_eq!(value.as_vector3(), Vector3::default());
    assert_eq!(value.as_quaternion(), Quaternion::IDENTITY);
    assert_eq!(value.as_color4(), Color4::default());
}

#[test]
fn string_to_boolean_is_exact() {
    assert!(Osd::from("true").as_boolean());
    assert!(Osd::from("1").as_boolean());
    assert!(!Osd::from("TRUE").as_boolean());
    assert!(!Osd::from("True").as_boolean());
    assert!(!Osd::from("yes").as_boolean());
}

#[test]
fn numeric_coercions() {
    assert_eq!(Osd::Real(2.6).as_integer(), 3);
    assert_eq!(Osd::Real(f64::NAN).as_integer(), 0);
    assert!(Osd::Real(f64::NAN).as_boolean());
    assert_eq!(Osd::from("42").as_integer(), 42);
    assert_eq!(Osd::from("4.9").as_integer(), 4);
    assert_eq!(Osd::from("junk").as_integer(), 0);
    assert_eq!(Osd::from("2.5").as_real(), 2.5);
    assert!(Osd::from("nan").as_real().is_nan());
    assert_eq!(Osd::Boolean(true).as_real(), 1.0);
    assert_eq!(Osd::Integer(7).as_string(), "7");
    assert_eq!(Osd::Boolean(false).as_string(), "false");
}

#[test]
fn ulong_round_trips_through_binary() {
    let handle = 0x0003_E800_0003_E900_u64;
    let value = Osd::from_ulong(handle);
    assert_eq!(value.osd_type(), OsdType::Binary);
    assert_eq!(value.as_ulong(), handle);
    assert_eq!(Osd::from("123").as_ulong(), 123);
}

#[test]
fn binary_projections() {
    assert_eq!(Osd::Integer(1).as_binary(), vec![0, 0, 0, 1]);
    assert_eq!(Osd::Binary(vec![0, 0, 1, 0]).as_integer(), 256);
    assert_eq!(Osd::Boolean(true).as_binary(), vec![1]);
    let bytes = Osd::Array(OsdArray::from(vec![Osd::Integer(1), Osd::Integer(258)]));
    assert_eq!(bytes.as_binary(), vec![1, 2]);
    assert_eq!(Osd::Binary(vec![1, 2, 3]).as_string(), "AQID");
}

#[test]
fn uuid_and_date_from_strings() {
    let id = Uuid::parse_str("6b5c7a96-2f4c-4b6e-9b6a-0c4a5c6f7e8d").unwrap();
    assert_eq!(Osd::from(id.to_string()).as_uuid(), id);
    assert_eq!(Osd::from("not-a-uuid").as_uuid(), Uuid::nil());

    let date = Osd::from("2008-11-26T16:51:55Z").as_date();
    assert_eq!(date, Utc.with_ymd_and_hms(2008, 11, 26, 16, 51, 55).unwrap());
    assert_eq!(Osd::from("garbage").as_date().timestamp(), 0);
}

#[test]
fn vectors_need_exact_lengths() {
    let v = Osd::from(Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(v.osd_type(), OsdType::Array);
    assert_eq!(v.as_vector3(), Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(v.as_vector3d(), Vector3d::new(1.0, 2.0, 3.0));
    // Wrong arity falls back to the default.
    assert_eq!(v.as_quaternion(), Quaternion::IDENTITY);
    assert_eq!(Osd::from("<1, 2, 3>").as_vector3(), Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(Osd::from("<1, 2>").as_vector3(), Vector3::default());
}

#[test]
fn path_lookup_never_fails() {
    let inner = OsdMap::new();
    inner.insert("list", OsdArray::from_iter([10, 20]));
    let root = OsdMap::new();
    root.insert("inner", inner);
    let root = Osd::from(root);

    assert_eq!(root.pointer("inner/list/1").as_integer(), 20);
    assert!(root.pointer("inner/list/5").is_undefined());
    assert!(root.pointer("inner/list/x").is_undefined());
    assert!(root.pointer("nope/deeper").is_undefined());
    assert_eq!(root.get("inner").get("list").at(0).as_integer(), 10);
    assert!(root.get("inner").get("missing").get("deeper").is_undefined());
}
