use std::io::{self, Cursor, Read, Seek, SeekFrom};

use osd::format::{self, OsdFormat};
use osd::{Osd, OsdError, OsdMap};

/// Readable but refuses to seek, like a socket.
struct Unseekable(Cursor<Vec<u8>>);

impl Read for Unseekable {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Seek for Unseekable {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "stream is not seekable"))
    }
}

fn sample() -> Osd {
    let map = OsdMap::new();
    map.insert("name", "Test");
    map.insert("count", 5);
    Osd::from(map)
}

#[test]
fn routes_binary_payloads() {
    let bytes = osd::binary::serialize(&sample());
    assert_eq!(osd::detect(&bytes), OsdFormat::Binary);
    assert_eq!(osd::deserialize(&bytes).unwrap(), sample());
}

#[test]
fn routes_xml_with_bom_and_whitespace() {
    let text = "\u{FEFF}  <?xml version=\"1.0\"?><llsd><map><key>count</key><integer>5</integer></map></llsd>";
    assert_eq!(format::detect_str(text), OsdFormat::Xml);
    assert_eq!(osd::deserialize_str(text).unwrap().get("count"), Osd::Integer(5));
    assert_eq!(osd::deserialize(text.as_bytes()).unwrap().get("count"), Osd::Integer(5));
}

#[test]
fn routes_json() {
    assert_eq!(osd::detect(b"{}"), OsdFormat::Json);
    let value = osd::deserialize_str("{}").unwrap();
    assert_eq!(value.as_map().map(OsdMap::len), Some(0));
}

#[test]
fn falls_back_to_notation() {
    let text = osd::notation::serialize(&sample());
    assert_eq!(osd::detect(text.as_bytes()), OsdFormat::Json);
    assert_eq!(osd::deserialize_str(&text).unwrap(), sample());
}

#[test]
fn neither_json_nor_notation_reports_json_error() {
    let err = osd::deserialize(b"@@@").unwrap_err();
    assert!(err.to_string().contains("invalid JSON"), "{err}");
}

#[test]
fn malformed_xml_stays_lenient_through_dispatch() {
    let value = osd::deserialize(b"<llsd><map><key>a</key></llsd>").unwrap();
    assert!(value.is_undefined());
}

#[test]
fn stream_requires_seek() {
    let mut stream = Unseekable(Cursor::new(b"{}".to_vec()));
    assert!(matches!(
        osd::deserialize_stream(&mut stream),
        Err(OsdError::NotSeekable)
    ));
}

#[test]
fn empty_stream_is_eof() {
    let mut stream = Cursor::new(Vec::new());
    assert!(matches!(
        osd::deserialize_stream(&mut stream),
        Err(OsdError::UnexpectedEof)
    ));
}

#[test]
fn stream_rewinds_after_detection() {
    let xml = osd::xml::serialize(&sample());
    let mut stream = Cursor::new(xml.into_bytes());
    assert_eq!(osd::deserialize_stream(&mut stream).unwrap(), sample());

    // Short payloads below the prefix length still decode.
    let mut stream = Cursor::new(b"[1]".to_vec());
    let value = osd::deserialize_stream(&mut stream).unwrap();
    assert_eq!(value.at(0).as_integer(), 1);
}

#[test]
fn reader_buffers_unseekable_input() {
    let bytes = osd::binary::serialize(&sample());
    let mut stream = Unseekable(Cursor::new(bytes));
    assert_eq!(format::deserialize_reader(&mut stream).unwrap(), sample());
    let mut empty = Unseekable(Cursor::new(Vec::new()));
    assert!(matches!(
        format::deserialize_reader(&mut empty),
        Err(OsdError::UnexpectedEof)
    ));
}

#[test]
fn serialize_by_format_round_trips() {
    for target in [
        OsdFormat::Binary,
        OsdFormat::Xml,
        OsdFormat::Json,
        OsdFormat::Notation,
    ] {
        let bytes = format::serialize(&sample(), target);
        let back = format::deserialize_format(&bytes, target).unwrap();
        assert_eq!(back, sample(), "{target}");
        assert_eq!(osd::deserialize(&bytes).unwrap(), sample(), "{target}");
    }
}

/// Mesh headers are consumed with chained lookups that never check for
/// presence first.
#[test]
fn mesh_header_lookup() {
    let domain = OsdMap::new();
    domain.insert("Min", osd::Vector3::new(-0.5, -0.5, -0.5));
    domain.insert("Max", osd::Vector3::new(0.5, 0.5, 0.5));
    let high = OsdMap::new();
    high.insert("offset", 0);
    high.insert("size", 184);
    high.insert("PositionDomain", domain);
    let header = OsdMap::new();
    header.insert("high_lod", high);
    header.insert("version", 1);

    let decoded = osd::deserialize(&osd::binary::serialize(&Osd::from(header))).unwrap();
    assert_eq!(decoded.get("high_lod").get("size").as_integer(), 184);
    assert_eq!(
        decoded.get("high_lod").get("PositionDomain").get("Max").as_vector3(),
        osd::Vector3::new(0.5, 0.5, 0.5)
    );
    assert_eq!(decoded.get("medium_lod").get("size").as_integer(), 0);
    assert!(decoded.get("medium_lod").get("PositionDomain").get("Min").is_undefined());
}

#[test]
fn deep_nesting_is_an_error_not_a_crash() {
    // Not JSON past serde_json's limit, so this also exercises the notation fallback.
    assert!(osd::deserialize(&vec![b'['; 1_000_000]).is_err());
    assert!(osd::deserialize(&vec![b'{'; 1_000_000]).is_err());
}
