use std::path::{Path, PathBuf};
use config::OutputFormat;
use tracing::{debug, info};

use crate::encode::encode;
use crate::error::ComposeError;
use crate::transform::{apply_mask, clamp_radius, load_rgba, rounded_rect_mask};


#[derive(Debug, Clone)]
pub struct Composed {
    pub path: PathBuf,
    pub radius: u32,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    pub bytes: usize,
}

/// Round the corners of `input` and write the result to `output`.
///
/// The parent directory of `output` must already exist.
pub async fn compose(input: &Path, output: &Path, radius: u32, format: OutputFormat) -> Result<Composed, ComposeError> {
    let importable = input.to_owned();
    let target = output.to_owned();

    let (buf, width, height, used) = tokio::task::spawn_blocking(move || {
        let source = load_rgba(&importable)?;
        let (w, h) = source.dimensions();
        let used = clamp_radius(w, h, radius);

        let mask = rounded_rect_mask(w, h, used);
        let rounded = apply_mask(&source, &mask);

        let buf = encode(&rounded, format, &target)?;
        debug!("Encoded {}x{} {} image for {:?} ({} bytes)", w, h, format, target, buf.len());

        Ok::<_, ComposeError>((buf, w, h, used))
    })
    .await??;

    tokio::fs::write(output, &buf).await
        .map_err(|e| ComposeError::Write { path: output.to_owned(), source: e })?;

    info!("Saved {} with corner radius {}px", output.display(), used);

    Ok(Composed {
        path: output.to_owned(),
        radius: used,
        width,
        height,
        format,
        bytes: buf.len(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::path::PathBuf;
    use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use super::*;

    pub fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("favicon-rounder-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    pub fn gradient(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([(x * 7) as u8, (y * 5) as u8, (x + y) as u8, 40]))
    }

    #[tokio::test]
    async fn output_keeps_size_and_color() {
        let dir = scratch_dir("size");
        let input = dir.join("logo.png");
        let output = dir.join("out.png");
        let source = gradient(48, 32);
        source.save(&input).unwrap();

        let composed = compose(&input, &output, 8, OutputFormat::Png).await.unwrap();
        assert_eq!((composed.width, composed.height, composed.radius), (48, 32, 8));

        let out = image::open(&output).unwrap().to_rgba8();
        let mask = rounded_rect_mask(48, 32, 8);
        assert_eq!(out.dimensions(), (48, 32));

        for (x, y, p) in out.enumerate_pixels() {
            assert_eq!(&p.0[..3], &source.get_pixel(x, y).0[..3]);
            // Original alpha of 40 is discarded
            assert_eq!(p.0[3], mask.get_pixel(x, y).0[0]);
        }

        assert_eq!(out.get_pixel(0, 0).0[3], 0);
        assert_eq!(out.get_pixel(24, 16).0[3], 255);
    }

    #[tokio::test]
    async fn opaque_source_without_alpha() {
        let dir = scratch_dir("rgb");
        let input = dir.join("logo.png");
        let output = dir.join("out.png");
        RgbImage::from_pixel(10, 10, Rgb([9, 8, 7])).save(&input).unwrap();

        compose(&input, &output, 0, OutputFormat::Png).await.unwrap();

        let out = image::open(&output).unwrap().to_rgba8();
        assert!(out.pixels().all(|p| p.0 == [9, 8, 7, 255]));
    }

    #[tokio::test]
    async fn gray_source_is_expanded() {
        let dir = scratch_dir("gray");
        let input = dir.join("logo.png");
        let output = dir.join("out.png");
        GrayImage::from_pixel(12, 12, Luma([100])).save(&input).unwrap();

        compose(&input, &output, 3, OutputFormat::Png).await.unwrap();

        let out = image::open(&output).unwrap().to_rgba8();
        assert_eq!(out.get_pixel(6, 6).0, [100, 100, 100, 255]);
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
    }

    #[tokio::test]
    async fn oversized_radius_is_clamped() {
        let dir = scratch_dir("clamp");
        let input = dir.join("logo.png");
        let output = dir.join("out.png");
        gradient(16, 16).save(&input).unwrap();

        let composed = compose(&input, &output, 1000, OutputFormat::Png).await.unwrap();
        assert_eq!(composed.radius, 8);
    }

    #[tokio::test]
    async fn png_bytes_behind_ico_name() {
        let dir = scratch_dir("mismatch");
        let input = dir.join("logo.png");
        let output = dir.join("favicon.ico");
        gradient(16, 16).save(&input).unwrap();

        compose(&input, &output, 4, OutputFormat::Png).await.unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    }

    #[tokio::test]
    async fn real_ico_output() {
        let dir = scratch_dir("ico");
        let input = dir.join("logo.png");
        let output = dir.join("favicon.ico");
        gradient(32, 32).save(&input).unwrap();

        compose(&input, &output, 6, OutputFormat::Ico).await.unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Ico);
        let out = image::load_from_memory_with_format(&bytes, ImageFormat::Ico).unwrap().to_rgba8();
        assert_eq!(out.dimensions(), (32, 32));
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
    }

    #[tokio::test]
    async fn same_input_same_bytes() {
        let dir = scratch_dir("idempotent");
        let input = dir.join("logo.png");
        let output = dir.join("out.png");
        gradient(40, 40).save(&input).unwrap();

        compose(&input, &output, 10, OutputFormat::Png).await.unwrap();
        let first = std::fs::read(&output).unwrap();
        compose(&input, &output, 10, OutputFormat::Png).await.unwrap();
        let second = std::fs::read(&output).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn error_kinds() {
        let dir = scratch_dir("errors");
        let output = dir.join("out.png");

        let missing = compose(&dir.join("nope.png"), &output, 4, OutputFormat::Png).await;
        assert!(matches!(missing, Err(ComposeError::FileNotFound(_))));

        let garbage = dir.join("garbage.dat");
        std::fs::write(&garbage, b"definitely not an image").unwrap();
        let unrecognized = compose(&garbage, &output, 4, OutputFormat::Png).await;
        assert!(matches!(unrecognized, Err(ComposeError::Unrecognized(_))));

        // Valid signature, broken body
        let truncated = dir.join("truncated.png");
        std::fs::write(&truncated, b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();
        let corrupt = compose(&truncated, &output, 4, OutputFormat::Png).await;
        assert!(matches!(corrupt, Err(ComposeError::Decode { .. })));

        let input = dir.join("logo.png");
        gradient(8, 8).save(&input).unwrap();
        let no_dir = compose(&input, &dir.join("missing/out.png"), 4, OutputFormat::Png).await;
        assert!(matches!(no_dir, Err(ComposeError::Write { .. })));

        assert!(!output.exists());
    }
}
