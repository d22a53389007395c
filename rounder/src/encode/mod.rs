pub mod ico;
pub mod png;

use std::path::Path;
use config::OutputFormat;
use image::RgbaImage;

use crate::error::ComposeError;

pub use ico::*;
pub use png::*;


/// Encode `image` in the requested format, `path` is only used for error context.
pub fn encode(image: &RgbaImage, format: OutputFormat, path: &Path) -> Result<Vec<u8>, ComposeError> {
    let encoded = match format {
        OutputFormat::Png => png_writer(image),
        OutputFormat::Ico => ico_writer(image),
    };

    encoded.map_err(|e| ComposeError::Encode { path: path.to_owned(), format, source: e })
}
