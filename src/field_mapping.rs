// Field layout of an ID3v1 tag
//
// Every field lives at a fixed offset inside the 128-byte tag:
//
//   0..3     "TAG"
//   3..33    title
//   33..63   artist
//   63..93   album
//   93..97   year
//   97..127  comment
//   126      track (shares the last comment byte, ID3v1.1)
//   127      genre
//
// Decoding, encoding and error reporting all read offsets from this table.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Byte range reserved for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub offset: usize,
    pub len: usize,
}

impl Slot {
    const fn new(offset: usize, len: usize) -> Self {
        Slot { offset, len }
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Tag fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Artist,
    Album,
    Year,
    Comment,
    Track,
    Genre,
}

impl Field {
    /// Fields stored as padded text, in wire order
    pub const TEXT: [Field; 5] = [
        Field::Title,
        Field::Artist,
        Field::Album,
        Field::Year,
        Field::Comment,
    ];

    /// Location of the field inside the tag
    pub const fn slot(self) -> Slot {
        match self {
            Field::Title => Slot::new(3, 30),
            Field::Artist => Slot::new(33, 30),
            Field::Album => Slot::new(63, 30),
            Field::Year => Slot::new(93, 4),
            Field::Comment => Slot::new(97, 30),
            Field::Track => Slot::new(126, 1),
            Field::Genre => Slot::new(127, 1),
        }
    }

    /// Whether trailing spaces are stripped after decoding
    pub fn is_trimmed(self) -> bool {
        matches!(
            self,
            Field::Title | Field::Artist | Field::Album | Field::Comment
        )
    }

    /// Get field name (lowercase)
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Artist => "artist",
            Field::Album => "album",
            Field::Year => "year",
            Field::Comment => "comment",
            Field::Track => "track",
            Field::Genre => "genre",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Field::Title),
            "artist" => Ok(Field::Artist),
            "album" => Ok(Field::Album),
            "year" => Ok(Field::Year),
            "comment" => Ok(Field::Comment),
            "track" => Ok(Field::Track),
            "genre" => Ok(Field::Genre),
            other => Err(format!("unknown field `{}`", other)),
        }
    }
}
