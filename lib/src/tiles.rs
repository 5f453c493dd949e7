//! Image padding and tile brightness extraction
//!
//! An input image is centered on a white canvas whose dimensions are the
//! next powers of two, then partitioned into equal square tiles, one per
//! output glyph cell. Each tile is reduced to its luma-weighted average
//! brightness in [0, 1], which is what the matcher consumes.

use image::{Rgba, RgbaImage};
use rayon::prelude::*;

// Rec. 709 luma weights
const RED_WEIGHT: f64 = 0.2126;
const GREEN_WEIGHT: f64 = 0.7152;
const BLUE_WEIGHT: f64 = 0.0722;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Smallest power of two >= `size`
pub(crate) fn next_pow2(size: u32) -> u32 {
    let mut n = 1;
    while n < size {
        n *= 2;
    }
    n
}

/// Center the image on a white canvas with power-of-two dimensions
///
/// An image whose dimensions are already powers of two is returned as an
/// unpadded copy.
pub fn pad_to_pow2(image: &RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let padded_width = next_pow2(width);
    let padded_height = next_pow2(height);
    if (padded_width, padded_height) == (width, height) {
        return image.clone();
    }

    let offset_x = (padded_width - width) / 2;
    let offset_y = (padded_height - height) / 2;
    let mut padded = RgbaImage::from_pixel(padded_width, padded_height, WHITE);
    for (x, y, &pixel) in image.enumerate_pixels() {
        padded.put_pixel(x + offset_x, y + offset_y, pixel);
    }
    padded
}

/// Luma of one pixel in [0, 255]
fn luma(pixel: &Rgba<u8>) -> f64 {
    pixel[0] as f64 * RED_WEIGHT + pixel[1] as f64 * GREEN_WEIGHT + pixel[2] as f64 * BLUE_WEIGHT
}

/// Average brightness of every tile, row-major
///
/// `resolution` is the number of tiles per row; tiles are squares of side
/// `width / resolution`. Each value is the tile's luma sum normalized by
/// `255 * tile_area`, so a white tile reads 1.0 and a black tile 0.0.
/// Tiles are averaged in parallel.
///
/// The image is expected to be pre-padded: `resolution` must divide the
/// width, and the tile side must divide the height.
pub fn tile_brightnesses(image: &RgbaImage, resolution: u32) -> Vec<Vec<f64>> {
    let (width, height) = image.dimensions();
    assert!(
        resolution >= 1 && resolution <= width && width % resolution == 0,
        "resolution must divide the image width"
    );

    let tile_size = width / resolution;
    let rows = height / tile_size;
    let num_tiles = (rows * resolution) as usize;

    let flat: Vec<f64> = (0..num_tiles)
        .into_par_iter()
        .map(|tile_idx| {
            let tile_x = (tile_idx as u32) % resolution;
            let tile_y = (tile_idx as u32) / resolution;
            let mut sum = 0.0;

            for local_y in 0..tile_size {
                for local_x in 0..tile_size {
                    let px = tile_x * tile_size + local_x;
                    let py = tile_y * tile_size + local_y;
                    sum += luma(image.get_pixel(px, py));
                }
            }

            sum / (255.0 * (tile_size * tile_size) as f64)
        })
        .collect();

    flat.chunks(resolution as usize).map(<[f64]>::to_vec).collect()
}
