//! The self-describing structured data value, [`Osd`].
//!
//! Every variant answers every `as_*` projection. Conversions without a
//! meaningful interpretation fall back to a fixed default (`false`, `0`,
//! `0.0`, `""`, nil UUID, the Unix epoch, empty bytes, zero vectors, the
//! identity quaternion) instead of failing.

use base64::prelude::*;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::parse;
use crate::types::{Color4, OsdType, Quaternion, Vector2, Vector3, Vector3d, Vector4};
use crate::{OsdArray, OsdMap};

/// A structured data value.
///
/// Scalar variants own their payload. `Map` and `Array` hold shared handles:
/// cloning an `Osd` that contains a container yields a second handle to the
/// same container, so mutations through either are visible through both.
/// Use [`OsdMap::copy`] / [`OsdArray::copy`] for an independent (shallow)
/// container.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Osd {
    #[default]
    Undefined,
    Boolean(bool),
    /// Binary carries 32-bit integers only. Wider values are written as reals
    /// and come back exact only up to 2^53 in magnitude.
    Integer(i64),
    Real(f64),
    String(String),
    Uuid(Uuid),
    Date(DateTime<Utc>),
    Uri(String),
    Binary(Vec<u8>),
    Map(OsdMap),
    Array(OsdArray),
    LlsdXml(String),
}

impl Osd {
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Osd::Uri(uri.into())
    }

    /// Wraps an already rendered XML fragment for verbatim embedding.
    pub fn llsd_xml(fragment: impl Into<String>) -> Self {
        Osd::LlsdXml(fragment.into())
    }

    /// Stores a 64-bit unsigned value (region handles and the like) as eight
    /// big-endian bytes.
    pub fn from_ulong(value: u64) -> Self {
        Osd::Binary(value.to_be_bytes().to_vec())
    }

    pub fn osd_type(&self) -> OsdType {
        match self {
            Osd::Undefined => OsdType::Unknown,
            Osd::Boolean(_) => OsdType::Boolean,
            Osd::Integer(_) => OsdType::Integer,
            Osd::Real(_) => OsdType::Real,
            Osd::String(_) => OsdType::String,
            Osd::Uuid(_) => OsdType::Uuid,
            Osd::Date(_) => OsdType::Date,
            Osd::Uri(_) => OsdType::Uri,
            Osd::Binary(_) => OsdType::Binary,
            Osd::Map(_) => OsdType::Map,
            Osd::Array(_) => OsdType::Array,
            Osd::LlsdXml(_) => OsdType::LlsdXml,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Osd::Undefined)
    }

    pub fn as_map(&self) -> Option<&OsdMap> {
        match self {
            Osd::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&OsdArray> {
        match self {
            Osd::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Keyed lookup that never fails: anything other than a map holding
    /// `key` yields `Osd::Undefined`, so lookups can be chained.
    pub fn get(&self, key: &str) -> Osd {
        match self {
            Osd::Map(map) => map.get(key),
            _ => Osd::Undefined,
        }
    }

    /// Positional lookup. Non-arrays yield `Osd::Undefined`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is an array and `index` is out of range.
    pub fn at(&self, index: usize) -> Osd {
        match self {
            Osd::Array(array) => array.at(index),
            _ => Osd::Undefined,
        }
    }

    /// Follows a `/`-separated path of map keys and array indices.
    ///
    /// Empty segments are skipped. A missing key, an out-of-range or
    /// non-numeric index, or a step into a scalar all yield `Osd::Undefined`.
    ///
    /// ```
    /// use osd::{Osd, OsdMap};
    ///
    /// let lod = OsdMap::new();
    /// lod.insert("PositionDomain", Osd::from(vec![1u8, 2]));
    /// let root = OsdMap::new();
    /// root.insert("high_lod", lod);
    /// let root = Osd::from(root);
    ///
    /// assert_eq!(root.pointer("/high_lod/PositionDomain").as_binary(), vec![1, 2]);
    /// assert!(root.pointer("medium_lod/PositionDomain").is_undefined());
    /// ```
    pub fn pointer(&self, path: &str) -> Osd {
        let mut current = self.clone();
        for step in path.split('/').filter(|s| !s.is_empty()) {
            current = match &current {
                Osd::Map(map) => map.get(step),
                Osd::Array(array) => step
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| array.get(i))
                    .unwrap_or_default(),
                _ => Osd::Undefined,
            };
        }
        current
    }

    fn count(&self) -> usize {
        match self {
            Osd::Map(map) => map.len(),
            Osd::Array(array) => array.len(),
            _ => 0,
        }
    }

    /// Non-zero numbers are true, NaN included. Containers are true when
    /// non-empty.
    pub fn as_boolean(&self) -> bool {
        match self {
            Osd::Boolean(b) => *b,
            Osd::Integer(i) => *i != 0,
            Osd::Real(r) => *r != 0.0,
            Osd::String(s) => parse::parse_boolean(s),
            Osd::Map(_) | Osd::Array(_) => self.count() > 0,
            _ => false,
        }
    }

    pub fn as_integer(&self) -> i64 {
        match self {
            Osd::Boolean(b) => i64::from(*b),
            Osd::Integer(i) => *i,
            Osd::Real(r) if r.is_nan() => 0,
            Osd::Real(r) => r.round() as i64,
            Osd::String(s) => parse::parse_integer_loose(s),
            Osd::Date(d) => d.timestamp(),
            Osd::Binary(b) => be_integer(b),
            _ => 0,
        }
    }

    pub fn as_ulong(&self) -> u64 {
        match self {
            Osd::Boolean(b) => u64::from(*b),
            Osd::Integer(i) => *i as u64,
            Osd::Real(r) if r.is_nan() => 0,
            Osd::Real(r) => *r as u64,
            Osd::String(s) => parse::parse_or_default(s),
            Osd::Binary(b) if b.len() >= 8 => {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(&b[..8]);
                u64::from_be_bytes(bytes)
            }
            _ => 0,
        }
    }

    pub fn as_real(&self) -> f64 {
        match self {
            Osd::Boolean(b) => f64::from(u8::from(*b)),
            Osd::Integer(i) => *i as f64,
            Osd::Real(r) => *r,
            Osd::String(s) => parse::parse_real(s),
            Osd::Date(d) => parse::date_to_seconds(d),
            Osd::Binary(b) if b.len() >= 8 => {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(&b[..8]);
                f64::from_be_bytes(bytes)
            }
            _ => 0.0,
        }
    }

    pub fn as_string(&self) -> String {
        match self {
            Osd::Undefined | Osd::Map(_) | Osd::Array(_) => String::new(),
            Osd::Boolean(b) => b.to_string(),
            Osd::Integer(i) => i.to_string(),
            Osd::Real(r) => parse::format_real(*r),
            Osd::String(s) | Osd::Uri(s) | Osd::LlsdXml(s) => s.clone(),
            Osd::Uuid(u) => u.hyphenated().to_string(),
            Osd::Date(d) => parse::format_date(d),
            Osd::Binary(b) => BASE64_STANDARD.encode(b),
        }
    }

    pub fn as_uuid(&self) -> Uuid {
        match self {
            Osd::Uuid(u) => *u,
            Osd::String(s) => parse::parse_uuid(s),
            Osd::Binary(b) if b.len() >= 16 => Uuid::from_slice(&b[..16]).unwrap_or(Uuid::nil()),
            _ => Uuid::nil(),
        }
    }

    pub fn as_date(&self) -> DateTime<Utc> {
        match self {
            Osd::Date(d) => *d,
            Osd::String(s) => parse::parse_date(s),
            Osd::Integer(i) => DateTime::from_timestamp(*i, 0).unwrap_or_default(),
            Osd::Real(r) => parse::date_from_seconds(*r),
            _ => DateTime::<Utc>::default(),
        }
    }

    pub fn as_uri(&self) -> String {
        match self {
            Osd::Uri(s) | Osd::String(s) => s.clone(),
            _ => String::new(),
        }
    }

    pub fn as_binary(&self) -> Vec<u8> {
        match self {
            Osd::Boolean(b) => vec![u8::from(*b)],
            Osd::Integer(i) => match i32::try_from(*i) {
                Ok(small) => small.to_be_bytes().to_vec(),
                Err(_) => i.to_be_bytes().to_vec(),
            },
            Osd::Real(r) => r.to_be_bytes().to_vec(),
            Osd::String(s) | Osd::Uri(s) | Osd::LlsdXml(s) => s.as_bytes().to_vec(),
            Osd::Uuid(u) => u.as_bytes().to_vec(),
            Osd::Date(d) => parse::date_to_seconds(d).to_le_bytes().to_vec(),
            Osd::Binary(b) => b.clone(),
            Osd::Array(array) => array.to_vec().iter().map(|v| v.as_integer() as u8).collect(),
            Osd::Undefined | Osd::Map(_) => Vec::new(),
        }
    }

    /// Components for the vector-like projections: an array of exactly `n`
    /// elements, or a string in `<a, b, ...>` form with `n` components.
    fn components(&self, n: usize) -> Option<Vec<f64>> {
        match self {
            Osd::Array(array) if array.len() == n => {
                Some(array.to_vec().iter().map(Osd::as_real).collect())
            }
            Osd::String(s) => parse::parse_components(s).filter(|c| c.len() == n),
            _ => None,
        }
    }

    pub fn as_vector2(&self) -> Vector2 {
        self.components(2)
            .map(|c| Vector2::new(c[0] as f32, c[1] as f32))
            .unwrap_or_default()
    }

    pub fn as_vector3(&self) -> Vector3 {
        self.components(3)
            .map(|c| Vector3::new(c[0] as f32, c[1] as f32, c[2] as f32))
            .unwrap_or_default()
    }

    pub fn as_vector3d(&self) -> Vector3d {
        self.components(3)
            .map(|c| Vector3d::new(c[0], c[1], c[2]))
            .unwrap_or_default()
    }

    pub fn as_vector4(&self) -> Vector4 {
        self.components(4)
            .map(|c| Vector4::new(c[0] as f32, c[1] as f32, c[2] as f32, c[3] as f32))
            .unwrap_or_default()
    }

    pub fn as_quaternion(&self) -> Quaternion {
        self.components(4)
            .map(|c| Quaternion::new(c[0] as f32, c[1] as f32, c[2] as f32, c[3] as f32))
            .unwrap_or_default()
    }

    pub fn as_color4(&self) -> Color4 {
        self.components(4)
            .map(|c| Color4::new(c[0] as f32, c[1] as f32, c[2] as f32, c[3] as f32))
            .unwrap_or_default()
    }
}

/// Big-endian integer from the leading bytes: eight bytes read as `i64`,
/// four as `i32`, anything shorter as zero.
fn be_integer(bytes: &[u8]) -> i64 {
    if bytes.len() >= 8 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&bytes[..8]);
        i64::from_be_bytes(buf)
    } else if bytes.len() >= 4 {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&bytes[..4]);
        i64::from(i32::from_be_bytes(buf))
    } else {
        0
    }
}

impl From<bool> for Osd {
    fn from(v: bool) -> Self {
        Osd::Boolean(v)
    }
}

impl From<i32> for Osd {
    fn from(v: i32) -> Self {
        Osd::Integer(i64::from(v))
    }
}

impl From<u32> for Osd {
    fn from(v: u32) -> Self {
        Osd::Integer(i64::from(v))
    }
}

impl From<i64> for Osd {
    fn from(v: i64) -> Self {
        Osd::Integer(v)
    }
}

impl From<f32> for Osd {
    fn from(v: f32) -> Self {
        Osd::Real(f64::from(v))
    }
}

impl From<f64> for Osd {
    fn from(v: f64) -> Self {
        Osd::Real(v)
    }
}

impl From<&str> for Osd {
    fn from(v: &str) -> Self {
        Osd::String(v.to_owned())
    }
}

impl From<String> for Osd {
    fn from(v: String) -> Self {
        Osd::String(v)
    }
}

impl From<Uuid> for Osd {
    fn from(v: Uuid) -> Self {
        Osd::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Osd {
    fn from(v: DateTime<Utc>) -> Self {
        Osd::Date(v)
    }
}

impl From<Vec<u8>> for Osd {
    fn from(v: Vec<u8>) -> Self {
        Osd::Binary(v)
    }
}

impl From<&[u8]> for Osd {
    fn from(v: &[u8]) -> Self {
        Osd::Binary(v.to_vec())
    }
}

impl From<OsdMap> for Osd {
    fn from(v: OsdMap) -> Self {
        Osd::Map(v)
    }
}

impl From<OsdArray> for Osd {
    fn from(v: OsdArray) -> Self {
        Osd::Array(v)
    }
}

fn reals(components: &[f64]) -> Osd {
    Osd::Array(components.iter().map(|c| Osd::Real(*c)).collect())
}

impl From<Vector2> for Osd {
    fn from(v: Vector2) -> Self {
        reals(&[v.x.into(), v.y.into()])
    }
}

impl From<Vector3> for Osd {
    fn from(v: Vector3) -> Self {
        reals(&[v.x.into(), v.y.into(), v.z.into()])
    }
}

impl From<Vector3d> for Osd {
    fn from(v: Vector3d) -> Self {
        reals(&[v.x, v.y, v.z])
    }
}

impl From<Vector4> for Osd {
    fn from(v: Vector4) -> Self {
        reals(&[v.x.into(), v.y.into(), v.z.into(), v.w.into()])
    }
}

impl From<Quaternion> for Osd {
    fn from(v: Quaternion) -> Self {
        reals(&[v.x.into(), v.y.into(), v.z.into(), v.w.into()])
    }
}

impl From<Color4> for Osd {
    fn from(v: Color4) -> Self {
        reals(&[v.r.into(), v.g.into(), v.b.into(), v.a.into()])
    }
}
