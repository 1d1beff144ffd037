//! Byte sink and cursor used by the binary codec.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;
