use crate::image::pixel_image::PixelImage;

/// Mean squared error between two images of identical shape:
/// mean((a - b)²) over all `width * height * 3` samples.
///
/// Both pixel buffers are widened to `f64` before subtracting, so byte-scale
/// images cannot wrap when a difference is squared. The value is computed on
/// whatever scale each image carries: pass two normalized images for an MSE
/// in the [0, 1] range, two byte-scale images for one in the [0, max_color]
/// range.
pub fn mse(a: &PixelImage, b: &PixelImage) -> Result<f64, String> {
    if !a.same_shape(b) {
        return Err(format!(
            "Image dimensions do not match: {}x{} vs {}x{}",
            a.width, a.height, b.width, b.height
        ));
    }

    let n = a.sample_count() as f64;

    Ok(a.to_floats()
        .iter()
        .zip(b.to_floats().iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        / n)
}
