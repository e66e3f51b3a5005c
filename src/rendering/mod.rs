pub mod png_codec;

pub use png_codec::{decode, encode, CodecError};
