//! End-to-end conversion pipeline
//!
//! Pads the image, extracts per-tile brightness, and maps every tile
//! through the matcher into a character grid.

use image::RgbaImage;
use log::debug;

use crate::error::MosaicError;
use crate::matcher::CharMatcher;
use crate::tiles::{pad_to_pow2, tile_brightnesses};

/// Convert an image into a glyph grid
///
/// `resolution` is the number of glyphs per row. The returned grid has one
/// row per tile row and `resolution` characters per row, in the same
/// arrangement as the tiles.
///
/// # Errors
/// [`MosaicError::EmptyCharset`] when the matcher has no characters.
pub fn render_mosaic(
    image: &RgbaImage,
    resolution: u32,
    matcher: &CharMatcher,
) -> Result<Vec<Vec<char>>, MosaicError> {
    if matcher.is_empty() {
        return Err(MosaicError::EmptyCharset);
    }

    let padded = pad_to_pow2(image);
    let rows = tile_brightnesses(&padded, resolution);
    debug!(
        "converting {}x{} padded image at resolution {} ({} rows)",
        padded.width(),
        padded.height(),
        resolution,
        rows.len()
    );

    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|brightness| {
                    matcher
                        .glyph_for(brightness)
                        .ok_or(MosaicError::EmptyCharset)
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Caches;
    use image::Rgba;

    #[test]
    fn test_empty_charset_is_rejected() {
        let mut caches = Caches::new();
        let matcher = CharMatcher::new(&[], &mut caches);
        let img = RgbaImage::new(8, 8);

        let result = render_mosaic(&img, 2, &matcher);
        assert!(matches!(result, Err(MosaicError::EmptyCharset)));
    }

    #[test]
    fn test_grid_shape_matches_tiles() {
        let mut caches = Caches::new();
        let matcher = CharMatcher::new(&[' ', '.', '@'], &mut caches);
        let img = RgbaImage::new(16, 8);

        let grid = render_mosaic(&img, 4, &matcher).unwrap();
        assert_eq!(grid.len(), 2);
        assert!(grid.iter().all(|row| row.len() == 4));
    }

    #[test]
    fn test_uniform_image_yields_uniform_glyphs() {
        let mut caches = Caches::new();
        let matcher = CharMatcher::new(&[' ', ':', '#', '@'], &mut caches);
        let img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));

        let grid = render_mosaic(&img, 2, &matcher).unwrap();
        let first = grid[0][0];
        assert!(grid.iter().flatten().all(|&c| c == first));
    }

    #[test]
    fn test_black_image_maps_to_darkest_glyph() {
        let mut caches = Caches::new();
        let matcher = CharMatcher::new(&[' ', '@'], &mut caches);
        let img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));

        let grid = render_mosaic(&img, 2, &matcher).unwrap();
        // Space carries no ink, so it is the darkest of the pair
        assert!(grid.iter().flatten().all(|&c| c == ' '));
    }
}
