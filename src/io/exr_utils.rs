/* Copyright 2020 @TwoCookingMice */

use crate::error::Result;
use crate::math::bitmap::Bitmap;

use exr::prelude::*;

/// Write the bitmap as a linear RGB OpenEXR file.
pub fn write_exr_to_file(image: &Bitmap, file_path: &str) -> Result<()> {
    log::info!("Starting writing openexr images: {}.", file_path);

    let width = image.width();
    let pixels = image.raw_copy();
    write_rgb_file(file_path, image.width(), image.height(), |x, y| {
        pixels[y * width + x]
    })?;

    log::info!("EXR written to: {}.", file_path);
    Ok(())
}
