//! LLSD binary markers.

pub const HEADER: &[u8] = b"<? llsd/binary ?>";

pub const UNDEF: u8 = b'!';
pub const TRUE: u8 = b'1';
pub const FALSE: u8 = b'0';
pub const INTEGER: u8 = b'i';
pub const REAL: u8 = b'r';
pub const UUID: u8 = b'u';
pub const BINARY: u8 = b'b';
pub const STRING: u8 = b's';
pub const URI: u8 = b'l';
pub const DATE: u8 = b'd';
pub const ARRAY_BEGIN: u8 = b'[';
pub const ARRAY_END: u8 = b']';
pub const MAP_BEGIN: u8 = b'{';
pub const MAP_END: u8 = b'}';
pub const KEY: u8 = b'k';
