//! Reader and writer for the ID3v1 tag
//!
//! An ID3v1 tag is a fixed 128-byte record at the very end of an audio file:
//!
//! | bytes   | field                                   |
//! |---------|-----------------------------------------|
//! | 0..3    | `TAG`                                   |
//! | 3..33   | title                                   |
//! | 33..63  | artist                                  |
//! | 63..93  | album                                   |
//! | 93..97  | year                                    |
//! | 97..127 | comment (byte 126 is the track if set)  |
//! | 127     | genre code                              |
//!
//! ```no_run
//! use id3v1tag::{read_tag, write_tag};
//!
//! let mut tag = read_tag("song.mp3")?;
//! tag.comment = "ripped from vinyl".to_string();
//! write_tag("song.mp3", &tag)?;
//! # Ok::<(), id3v1tag::TagError>(())
//! ```

pub mod error;
pub mod field_mapping;
pub mod id3;
mod utils;

use std::path::Path;

pub use error::{Result, TagError};
pub use field_mapping::{Field, Slot};
pub use id3::v1::{decode, encode, locate, validate};
pub use id3::{genre_code, genre_name, Id3v1Tag, GENRES, GENRE_MAX, TAG_ID, TAG_SIZE};

/// Read and normalize the tag at the end of a file
///
/// Returns [`TagError::NotFound`] if the file is shorter than a tag or does
/// not end with one.
pub fn read_tag<P: AsRef<Path>>(path: P) -> Result<Id3v1Tag> {
    Id3v1Tag::read_from_file(path)
}

/// Write a tag to an existing file
///
/// Replaces a trailing tag in place, or appends one if the file has none.
pub fn write_tag<P: AsRef<Path>>(path: P, tag: &Id3v1Tag) -> Result<()> {
    tag.write_to_file(path)
}

/// Remove the trailing tag from a file, returning whether there was one
pub fn remove_tag<P: AsRef<Path>>(path: P) -> Result<bool> {
    Id3v1Tag::remove_from_file(path)
}
