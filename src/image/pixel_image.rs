/// Number of channels per pixel. The loader only produces RGB images.
pub const CHANNELS: usize = 3;

/// Tagged pixel storage.
///
/// - `Bytes`  — raw source scale, one sample per channel in `[0, max_color]`
/// - `Floats` — normalized scale, one sample per channel in `[0.0, 1.0]`
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    Bytes(Vec<u8>),
    Floats(Vec<f64>),
}

/// An RGB image decoded from a plain-text PPM file.
///
/// Samples are stored as a flat row-major buffer of length
/// `width * height * 3`, interleaved R, G, B. The buffer carries its own
/// scale tag (`PixelData`), so callers never have to track a separate
/// "is this normalized?" flag alongside the image.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelImage {
    pub width: usize,
    pub height: usize,
    /// Maximum color value declared in the file header. Only meaningful for
    /// `Bytes` data; `Floats` data has already been divided by it.
    pub max_color: u8,
    pub data: PixelData,
}

impl PixelImage {
    /// Total number of samples (`width * height * 3`).
    pub fn sample_count(&self) -> usize {
        self.width * self.height * CHANNELS
    }

    /// True when both images have the same width and height. The channel
    /// count is fixed at 3, so it never needs comparing.
    pub fn same_shape(&self, other: &PixelImage) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Returns the samples widened to `f64`, without rescaling: `Bytes`
    /// images yield values on the `[0, max_color]` scale, `Floats` images
    /// yield their `[0, 1]` values unchanged.
    pub fn to_floats(&self) -> Vec<f64> {
        match &self.data {
            PixelData::Bytes(samples) => samples.iter().map(|&v| v as f64).collect(),
            PixelData::Floats(samples) => samples.clone(),
        }
    }
}
