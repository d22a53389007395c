use image::codecs::ico::IcoEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageResult, RgbaImage};


/// Single entry ICO container, the encoder rejects images above 256x256.
pub fn ico_writer(image: &RgbaImage) -> ImageResult<Vec<u8>> {
    let mut buf = vec![];

    IcoEncoder::new(&mut buf).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    ).map(|_| buf)
}
