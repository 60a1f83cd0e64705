// Encoding utilities
//
// ID3v1 text is one byte per character. encoding_rs resolves the ISO-8859-1
// label to windows-1252, which maps all 256 byte values to a character and
// back, so decoding is lossless.

use encoding_rs::WINDOWS_1252;

/// Decode single-byte text
pub fn decode_latin1(data: &[u8]) -> String {
    WINDOWS_1252
        .decode_without_bom_handling(data)
        .0
        .into_owned()
}

/// Encode text as single bytes
///
/// Returns `None` if any character has no single-byte representation.
pub fn encode_latin1(text: &str) -> Option<Vec<u8>> {
    let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
    if had_errors {
        return None;
    }

    Some(bytes.into_owned())
}

/// Bytes up to (not including) the first NUL
pub fn until_nul(data: &[u8]) -> &[u8] {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    &data[..end]
}
