mod round;

use std::io::ErrorKind;
use std::path::Path;
use image::{imageops, GrayImage, ImageReader, Luma, Rgba, RgbaImage};
use tracing::{debug, warn};

use crate::error::ComposeError;

pub use round::*;


pub const TRANSPARENT: Rgba<u8> = image::Rgba::<u8>([0, 0, 0, 0]);
pub const MASK_CLEAR: Luma<u8> = image::Luma::<u8>([0]);
pub const MASK_FILL: Luma<u8> = image::Luma::<u8>([255]);

/// Decode an image from disk into RGBA, synthesizing full opacity when the
/// source has no alpha channel.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, ComposeError> {
    let reader = ImageReader::open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ComposeError::FileNotFound(path.to_owned()),
            _ => ComposeError::Read { path: path.to_owned(), source: e },
        })?
        .with_guessed_format()
        .map_err(|e| ComposeError::Read { path: path.to_owned(), source: e })?;

    let format = match reader.format() {
        Some(f) => f,
        None => return Err(ComposeError::Unrecognized(path.to_owned())),
    };

    if !format.reading_enabled() {
        return Err(ComposeError::MissingCodec { path: path.to_owned(), format });
    }

    let img = reader.decode()
        .map_err(|e| ComposeError::Decode { path: path.to_owned(), source: e })?;

    if img.width() == 0 || img.height() == 0 {
        return Err(ComposeError::Empty { path: path.to_owned(), width: img.width(), height: img.height() });
    }

    debug!("Decoded {:?} image {:?} width: {} and height: {}", format, path, img.width(), img.height());

    Ok(img.to_rgba8())
}

/// Limit the radius to half the shorter side. At that radius the arcs meet,
/// an even sided square turns into a full circle.
pub fn clamp_radius(width: u32, height: u32, radius: u32) -> u32 {
    let max = width.min(height) / 2;

    if radius > max {
        warn!("Corner radius {}px too large for {}x{} image, using {}px", radius, width, height, max);
        return max
    }

    radius
}

/// Copy `source` onto a transparent canvas and take the alpha channel from `mask`.
pub fn apply_mask(source: &RgbaImage, mask: &GrayImage) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(source.width(), source.height(), TRANSPARENT);

    imageops::replace(&mut img, source, 0, 0);

    for (p, m) in img.pixels_mut().zip(mask.pixels()) {
        p.0[3] = m.0[0];
    }

    img
}
