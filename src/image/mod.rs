pub mod pixel_image;
pub mod ppm;

pub use pixel_image::{PixelData, PixelImage, CHANNELS};
pub use ppm::{parse_ppm, read_ppm};
