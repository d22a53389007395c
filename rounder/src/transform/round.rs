use image::GrayImage;
use imageproc::{drawing::{draw_filled_circle_mut, draw_filled_rect_mut}, rect::Rect};

use super::*;


/// Paint a full size rounded rectangle. `radius` is drawn as given, callers
/// limit it with [`clamp_radius`] first.
pub fn rounded_rect_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let mut mask = GrayImage::from_pixel(width, height, MASK_CLEAR);

    if width == 0 || height == 0 {
        return mask
    }

    // Zero radius is a plain rectangle
    if radius == 0 {
        draw_filled_rect_mut(&mut mask, Rect::at(0, 0).of_size(width, height), MASK_FILL);
        return mask
    }

    let r = radius as i32;
    let (w, h) = (width as i32, height as i32);

    // Full width band between the top and bottom arcs, gone once the arcs meet
    if height > 2 * radius {
        draw_filled_rect_mut(&mut mask, Rect::at(0, r).of_size(width, height - 2 * radius), MASK_FILL);
    }

    // Full height band between the left and right arcs
    if width > 2 * radius {
        draw_filled_rect_mut(&mut mask, Rect::at(r, 0).of_size(width - 2 * radius, height), MASK_FILL);
    }

    // Corner arcs, each circle touching two edges
    for center in [(r, r), (w - 1 - r, r), (r, h - 1 - r), (w - 1 - r, h - 1 - r)] {
        draw_filled_circle_mut(&mut mask, center, r, MASK_FILL);
    }

    mask
}
