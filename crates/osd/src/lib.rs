//! LLSD structured data ("OSD"): a self-describing value model and its four
//! interchangeable wire encodings.
//!
//! - [`binary`]: `"<? llsd/binary ?>"` followed by marker-tagged values
//! - [`xml`]: `<llsd>` documents, with strict and lenient decoders
//! - [`json`]: plain JSON through `serde_json`
//! - [`notation`]: the compact bracketed text form
//!
//! [`format`] sniffs raw input and routes it to the right decoder.
//!
//! ```
//! use osd::{Osd, OsdMap};
//!
//! let map = OsdMap::new();
//! map.insert("name", "Test");
//! map.insert("count", 5);
//! let doc = osd::xml::serialize(&Osd::from(map));
//!
//! let back = osd::deserialize(doc.as_bytes()).unwrap();
//! assert_eq!(back.get("count").as_integer(), 5);
//! assert!(back.get("missing").is_undefined());
//! ```

mod array;
mod error;
mod map;
mod types;
mod value;

pub mod binary;
pub mod buffers;
pub mod format;
pub mod json;
pub mod notation;
pub mod parse;
pub mod xml;

/// Deepest container nesting any decoder accepts. Deeper input is rejected
/// as malformed instead of exhausting the stack.
pub const MAX_DEPTH: usize = 128;

pub use array::OsdArray;
pub use error::{OsdError, Result};
pub use format::{deserialize, deserialize_stream, deserialize_str, detect, OsdFormat};
pub use map::OsdMap;
pub use types::{Color4, OsdType, Quaternion, Vector2, Vector3, Vector3d, Vector4};
pub use value::Osd;
