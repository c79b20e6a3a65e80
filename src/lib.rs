pub mod image;
pub mod metrics;

// Convenience re-exports
pub use image::pixel_image::{PixelData, PixelImage, CHANNELS};
pub use image::ppm::{parse_ppm, read_ppm};
pub use metrics::mse::mse;
