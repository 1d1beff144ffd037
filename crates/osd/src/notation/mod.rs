//! LLSD notation: the compact bracketed text form.
//!
//! ```text
//! {'name':'Test','count':i5,'pos':[r1.5,r2,r0],'id':u6b5c7a96-2f4c-4b6e-9b6a-0c4a5c6f7e8d}
//! ```

pub mod decoder;
pub mod encoder;

pub use decoder::NotationDecoder;
pub use encoder::{NotationEncoder, NotationOptions};

use crate::error::Result;
use crate::Osd;

pub fn serialize(value: &Osd) -> String {
    NotationEncoder::new().encode(value)
}

/// Multi-line output with indentation.
pub fn serialize_formatted(value: &Osd) -> String {
    serialize_with(
        value,
        NotationOptions {
            pretty: true,
            ..NotationOptions::default()
        },
    )
}

pub fn serialize_with(value: &Osd, options: NotationOptions) -> String {
    NotationEncoder::with_options(options).encode(value)
}

pub fn deserialize(text: &str) -> Result<Osd> {
    deserialize_bytes(text.as_bytes())
}

pub fn deserialize_bytes(data: &[u8]) -> Result<Osd> {
    NotationDecoder::new(data).decode()
}
