/// Plain-text PPM (`P3`) parsing.
///
/// # Supported file layout
/// ```text
/// P3                      magic number, identifies the plain-text RGB format
/// # comment               zero or more comment lines, only valid right here
/// <width> <height>        two whitespace-separated positive integers
/// <max_color>             one integer in [1, 255], the normalization divisor
/// <samples...>            width * height * 3 integers in [0, max_color],
///                         whitespace/newline separated, row-major R G B
/// ```
///
/// The raw bytes may start with a UTF-8 BOM (`EF BB BF`) or a UTF-16LE BOM
/// (`FF FE`); without a marker the file is decoded as UTF-8. Empty and
/// whitespace-only lines are discarded before any of the above is matched.
///
/// Comment lines are recognized only directly after the magic number, which
/// mirrors the historical behavior of this format's consumers. A `#` line
/// anywhere else is a malformed header or a malformed sample.
use std::fs;
use std::path::Path;

use crate::image::pixel_image::{PixelData, PixelImage, CHANNELS};

const BOM_UTF8: [u8; 3] = [0xEF, 0xBB, 0xBF];
const BOM_UTF16_LE: [u8; 2] = [0xFF, 0xFE];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads and parses a P3 PPM file from disk.
///
/// # Arguments
/// - `path`      — file to read; the file handle is released before parsing
/// - `normalize` — when `true`, every sample is divided by `max_color` and
///                 the result carries `PixelData::Floats` in `[0, 1]`; when
///                 `false` the raw `[0, max_color]` samples are kept as
///                 `PixelData::Bytes`
pub fn read_ppm<P: AsRef<Path>>(path: P, normalize: bool) -> Result<PixelImage, String> {
    let path = path.as_ref();
    let raw = fs::read(path)
        .map_err(|e| format!("Cannot read '{}': {}", path.display(), e))?;
    parse_ppm(&raw, normalize)
}

/// Parses P3 PPM bytes already in memory. `read_ppm` is this plus the file
/// read; tests and other in-memory callers use this entry directly.
pub fn parse_ppm(raw: &[u8], normalize: bool) -> Result<PixelImage, String> {
    let content = decode_text(raw)?;

    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    // ── Magic number ────────────────────────────────────────────────────────

    let magic = *lines
        .first()
        .ok_or_else(|| "File contains no data".to_owned())?;
    if magic != "P3" {
        return Err(format!("Not a P3 PPM file, magic number is '{}'", magic));
    }

    // Comments are only skipped here, directly after the magic number.
    let mut idx = 1;
    while idx < lines.len() && lines[idx].starts_with('#') {
        idx += 1;
    }

    // ── Width / height ──────────────────────────────────────────────────────

    let dims_line = lines
        .get(idx)
        .ok_or_else(|| "File ends before the width/height line".to_owned())?;
    let dims: Vec<&str> = dims_line.split_whitespace().collect();
    if dims.len() != 2 {
        return Err(format!(
            "Width/height line must contain exactly 2 integers, got {} token(s) in '{}'",
            dims.len(),
            dims_line
        ));
    }
    let width  = parse_dimension(dims[0], "width")?;
    let height = parse_dimension(dims[1], "height")?;
    idx += 1;

    // ── Max color value ─────────────────────────────────────────────────────

    let max_line = lines
        .get(idx)
        .ok_or_else(|| "File ends before the max color value line".to_owned())?;
    let max_tokens: Vec<&str> = max_line.split_whitespace().collect();
    if max_tokens.len() != 1 {
        return Err(format!(
            "Max color value line must contain exactly 1 integer, got {} token(s) in '{}'",
            max_tokens.len(),
            max_line
        ));
    }
    let max_color: u32 = max_tokens[0]
        .parse()
        .map_err(|_| format!("Max color value '{}' is not an unsigned integer", max_tokens[0]))?;
    if max_color == 0 || max_color > 255 {
        return Err(format!(
            "Max color value must be in [1, 255] for 8-bit samples, got {}",
            max_color
        ));
    }
    idx += 1;

    // ── Pixel samples ───────────────────────────────────────────────────────

    let expected = width * height * CHANNELS;
    let mut samples: Vec<u8> = Vec::with_capacity(expected);

    for token in lines[idx..].iter().flat_map(|line| line.split_whitespace()) {
        let value: u32 = token
            .parse()
            .map_err(|_| format!("Pixel sample '{}' is not an unsigned integer", token))?;
        if value > max_color {
            return Err(format!(
                "Pixel sample {} exceeds the declared max color value {}",
                value, max_color
            ));
        }
        samples.push(value as u8);
    }

    if samples.len() != expected {
        return Err(format!(
            "Pixel data does not match the declared {}x{} size: expected {} samples \
             ({} pixels x {} channels), got {}",
            width,
            height,
            expected,
            width * height,
            CHANNELS,
            samples.len()
        ));
    }

    let data = if normalize {
        let scale = max_color as f64;
        PixelData::Floats(samples.into_iter().map(|v| v as f64 / scale).collect())
    } else {
        PixelData::Bytes(samples)
    };

    Ok(PixelImage { width, height, max_color: max_color as u8, data })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_dimension(token: &str, name: &str) -> Result<usize, String> {
    let value: usize = token
        .parse()
        .map_err(|_| format!("Image {} '{}' is not an unsigned integer", name, token))?;
    if value == 0 {
        return Err(format!("Image {} must be at least 1, got 0", name));
    }
    Ok(value)
}

/// Decodes raw file bytes into text, honoring an optional byte-order marker.
fn decode_text(raw: &[u8]) -> Result<String, String> {
    if let Some(payload) = raw.strip_prefix(&BOM_UTF8) {
        return std::str::from_utf8(payload)
            .map(str::to_owned)
            .map_err(|_| "File has a UTF-8 BOM but its contents are not valid UTF-8".to_owned());
    }
    if let Some(payload) = raw.strip_prefix(&BOM_UTF16_LE) {
        return decode_utf16_le(payload);
    }
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|_| "File is not valid UTF-8 text".to_owned())
}

fn decode_utf16_le(payload: &[u8]) -> Result<String, String> {
    if payload.len() % 2 != 0 {
        return Err(format!(
            "File has a UTF-16LE BOM but an odd payload length ({} bytes)",
            payload.len()
        ));
    }
    let units: Vec<u16> = payload
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units)
        .map_err(|_| "File has a UTF-16LE BOM but its contents are not valid UTF-16".to_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const RED_1X1: &str = "P3\n1 1\n255\n255 0 0\n";

    fn utf16_le(text: &str) -> Vec<u8> {
        let mut bytes = BOM_UTF16_LE.to_vec();
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn parses_minimal_image() {
        let img = parse_ppm(RED_1X1.as_bytes(), false).unwrap();
        assert_eq!(img.width, 1);
        assert_eq!(img.height, 1);
        assert_eq!(img.max_color, 255);
        assert_eq!(img.data, PixelData::Bytes(vec![255, 0, 0]));
    }

    #[test]
    fn normalizes_by_max_color() {
        let img = parse_ppm(b"P3\n1 1\n200\n200 0 100\n", true).unwrap();
        assert_eq!(img.data, PixelData::Floats(vec![1.0, 0.0, 0.5]));
    }

    #[test]
    fn samples_are_row_major_across_lines() {
        let text = "P3\n2 2\n255\n1 2 3 4 5 6\n7 8 9\n10 11 12\n";
        let img = parse_ppm(text.as_bytes(), false).unwrap();
        assert_eq!(
            img.data,
            PixelData::Bytes(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12])
        );
    }

    #[test]
    fn blank_and_whitespace_lines_are_discarded() {
        let text = "\nP3\n\n   \n1 1\n255\n\n255 0 0\n  \n";
        let img = parse_ppm(text.as_bytes(), false).unwrap();
        assert_eq!(img.data, PixelData::Bytes(vec![255, 0, 0]));
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let mut bytes = BOM_UTF8.to_vec();
        bytes.extend_from_slice(RED_1X1.as_bytes());
        let img = parse_ppm(&bytes, false).unwrap();
        assert_eq!(img.data, PixelData::Bytes(vec![255, 0, 0]));
    }

    #[test]
    fn utf16_le_bom_decodes_like_utf8() {
        let plain = parse_ppm(RED_1X1.as_bytes(), false).unwrap();
        let wide  = parse_ppm(&utf16_le(RED_1X1), false).unwrap();
        assert_eq!(plain, wide);
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let err = parse_ppm(&[0x50, 0x33, 0x0A, 0xFF, 0xFF], false).unwrap_err();
        assert!(err.contains("not valid UTF-8"), "unexpected message: {err}");
    }

    #[test]
    fn odd_length_utf16_payload_is_an_encoding_error() {
        let mut bytes = utf16_le("P3");
        bytes.push(0x00);
        let err = parse_ppm(&bytes, false).unwrap_err();
        assert!(err.contains("odd payload length"), "unexpected message: {err}");
    }

    #[test]
    fn wrong_magic_names_the_actual_token() {
        let err = parse_ppm(b"P6\n1 1\n255\n255 0 0\n", false).unwrap_err();
        assert!(err.contains("'P6'"), "unexpected message: {err}");
    }

    #[test]
    fn empty_file_is_rejected() {
        let err = parse_ppm(b"", false).unwrap_err();
        assert!(err.contains("no data"), "unexpected message: {err}");
    }

    #[test]
    fn comments_after_magic_are_skipped() {
        let text = "P3\n# made by hand\n# second comment\n1 1\n255\n255 0 0\n";
        let img = parse_ppm(text.as_bytes(), false).unwrap();
        assert_eq!(img.data, PixelData::Bytes(vec![255, 0, 0]));
    }

    #[test]
    fn comment_between_dimensions_and_max_color_is_rejected() {
        let text = "P3\n1 1\n# not allowed here\n255\n255 0 0\n";
        let err = parse_ppm(text.as_bytes(), false).unwrap_err();
        assert!(err.contains("Max color value"), "unexpected message: {err}");
    }

    #[test]
    fn malformed_dimension_line_is_rejected() {
        let err = parse_ppm(b"P3\n1\n255\n255 0 0\n", false).unwrap_err();
        assert!(err.contains("exactly 2 integers"), "unexpected message: {err}");

        let err = parse_ppm(b"P3\n1 one\n255\n255 0 0\n", false).unwrap_err();
        assert!(err.contains("height 'one'"), "unexpected message: {err}");
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let err = parse_ppm(b"P3\n0 1\n255\n", false).unwrap_err();
        assert!(err.contains("width must be at least 1"), "unexpected message: {err}");
    }

    #[test]
    fn max_color_must_fit_eight_bits() {
        let err = parse_ppm(b"P3\n1 1\n0\n0 0 0\n", false).unwrap_err();
        assert!(err.contains("[1, 255]"), "unexpected message: {err}");

        let err = parse_ppm(b"P3\n1 1\n65535\n255 0 0\n", false).unwrap_err();
        assert!(err.contains("[1, 255]"), "unexpected message: {err}");
    }

    #[test]
    fn too_few_samples_is_a_parse_error() {
        let err = parse_ppm(b"P3\n2 1\n255\n255 0 0\n", false).unwrap_err();
        assert!(err.contains("expected 6 samples"), "unexpected message: {err}");
        assert!(err.contains("got 3"), "unexpected message: {err}");
    }

    #[test]
    fn too_many_samples_is_a_parse_error() {
        let err = parse_ppm(b"P3\n1 1\n255\n255 0 0 42\n", false).unwrap_err();
        assert!(err.contains("expected 3 samples"), "unexpected message: {err}");
        assert!(err.contains("got 4"), "unexpected message: {err}");
    }

    #[test]
    fn non_integer_sample_is_rejected() {
        let err = parse_ppm(b"P3\n1 1\n255\n255 0 red\n", false).unwrap_err();
        assert!(err.contains("'red'"), "unexpected message: {err}");

        let err = parse_ppm(b"P3\n1 1\n255\n255 0 -1\n", false).unwrap_err();
        assert!(err.contains("'-1'"), "unexpected message: {err}");
    }

    #[test]
    fn sample_above_max_color_is_rejected() {
        let err = parse_ppm(b"P3\n1 1\n100\n101 0 0\n", false).unwrap_err();
        assert!(err.contains("101 exceeds"), "unexpected message: {err}");
    }
}
