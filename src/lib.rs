pub mod codec;
pub mod config;
pub mod scene;
pub mod scene_file;
pub mod test_scenes;

pub use codec::{
    DecodeError, DecodeMode, DecodedScene, EncodeError, Record, Section, SectionKind, decode,
    decode_from, decode_with, encode, encode_to,
};
pub use scene::*;
