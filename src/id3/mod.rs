// ID3 metadata handling module
pub mod genres;
pub mod v1;

pub use genres::{genre_code, genre_name, GENRES, GENRE_MAX};
pub use v1::{Id3v1Tag, TAG_ID, TAG_SIZE};
