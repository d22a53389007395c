use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, ImageResult, RgbaImage};


/// Size optimized PNG, output is deterministic for equal input.
pub fn png_writer(image: &RgbaImage) -> ImageResult<Vec<u8>> {
    let mut buf = vec![];

    PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    ).map(|_| buf)
}
