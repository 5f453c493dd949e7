//! Long-lived conversion state
//!
//! A [`Session`] owns the current image, the output resolution, the
//! character matcher and the shared caches, and applies the edits the shell
//! feeds it. Every failing operation leaves prior state untouched.

use std::path::Path;

use image::RgbaImage;
use log::info;

use crate::cache::Caches;
use crate::error::MosaicError;
use crate::matcher::CharMatcher;
use crate::processor::render_mosaic;
use crate::tiles::next_pow2;

/// Charset a fresh session starts with
pub const DEFAULT_CHARSET: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Resolution a fresh session aims for, clamped into the image's bounds
pub const DEFAULT_RESOLUTION: u32 = 128;

/// Printable ASCII range covered by the `add all` edit
pub const PRINTABLE_RANGE: (char, char) = (' ', '~');

/// Image, resolution and matcher state plus the process-wide caches
pub struct Session {
    image: RgbaImage,
    resolution: u32,
    matcher: CharMatcher,
    caches: Caches,
}

impl Session {
    /// Start a session on the image at `path` with the default charset
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MosaicError> {
        let image = image::open(path)?.to_rgba8();
        Ok(Self::with_image(image))
    }

    /// Start a session on an already decoded image
    pub fn with_image(image: RgbaImage) -> Self {
        let mut caches = Caches::new();
        let matcher = CharMatcher::new(DEFAULT_CHARSET, &mut caches);
        let resolution = clamp_resolution(DEFAULT_RESOLUTION, &image);
        Self {
            image,
            resolution,
            matcher,
            caches,
        }
    }

    /// Glyphs per output row
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Double the resolution
    ///
    /// # Errors
    /// [`MosaicError::ResolutionOutOfBounds`] when doubling would exceed the
    /// tiled image width; the resolution is left unchanged.
    pub fn res_up(&mut self) -> Result<u32, MosaicError> {
        let doubled = self.resolution * 2;
        let (_, max) = resolution_bounds(&self.image);
        if doubled > max {
            return Err(MosaicError::ResolutionOutOfBounds);
        }
        self.resolution = doubled;
        Ok(self.resolution)
    }

    /// Halve the resolution
    ///
    /// # Errors
    /// [`MosaicError::ResolutionOutOfBounds`] when halving would drop below
    /// one glyph per image row.
    pub fn res_down(&mut self) -> Result<u32, MosaicError> {
        let halved = self.resolution / 2;
        let (min, _) = resolution_bounds(&self.image);
        if halved < min {
            return Err(MosaicError::ResolutionOutOfBounds);
        }
        self.resolution = halved;
        Ok(self.resolution)
    }

    /// Replace the source image; on failure the previous image stays
    pub fn set_image(&mut self, path: impl AsRef<Path>) -> Result<(), MosaicError> {
        let image = image::open(path)?.to_rgba8();
        self.resolution = clamp_resolution(self.resolution, &image);
        self.image = image;
        Ok(())
    }

    /// Add one character to the set
    pub fn add_char(&mut self, c: char) {
        self.matcher.add_char(c, &mut self.caches);
    }

    /// Remove one character from the set
    pub fn remove_char(&mut self, c: char) {
        self.matcher.remove_char(c, &mut self.caches);
    }

    /// Add every character in the inclusive code-point range, either order
    pub fn add_range(&mut self, low: char, high: char) {
        let (low, high) = ordered(low, high);
        for code in low..=high {
            self.add_char(code);
        }
    }

    /// Remove every character in the inclusive code-point range, either order
    pub fn remove_range(&mut self, low: char, high: char) {
        let (low, high) = ordered(low, high);
        for code in low..=high {
            self.remove_char(code);
        }
    }

    /// Add all printable ASCII (32-126)
    pub fn add_all(&mut self) {
        self.add_range(PRINTABLE_RANGE.0, PRINTABLE_RANGE.1);
    }

    /// Clear the set: the matcher is replaced wholesale by an empty one
    pub fn clear_chars(&mut self) {
        info!("charset cleared");
        self.matcher = CharMatcher::new(&[], &mut self.caches);
    }

    /// Current members in ascending code-point order
    pub fn chars(&self) -> &[char] {
        self.matcher.chars()
    }

    pub fn is_charset_empty(&self) -> bool {
        self.matcher.is_empty()
    }

    /// Run the conversion at the current resolution
    pub fn convert(&self) -> Result<Vec<Vec<char>>, MosaicError> {
        render_mosaic(&self.image, self.resolution, &self.matcher)
    }

    #[cfg(test)]
    pub(crate) fn matcher(&self) -> &CharMatcher {
        &self.matcher
    }
}

fn ordered(a: char, b: char) -> (char, char) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Legal resolution range over the tiled (padded) dimensions: at least one
/// glyph row, at most one glyph per pixel column
fn resolution_bounds(image: &RgbaImage) -> (u32, u32) {
    let width = next_pow2(image.width());
    let height = next_pow2(image.height());
    ((width / height).max(1), width)
}

/// Pull `resolution` into the legal range by doubling/halving; both bounds
/// are powers of two, so the result always divides the tiled width
fn clamp_resolution(mut resolution: u32, image: &RgbaImage) -> u32 {
    let (min, max) = resolution_bounds(image);
    while resolution > max {
        resolution /= 2;
    }
    while resolution < min {
        resolution *= 2;
    }
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn session(width: u32, height: u32) -> Session {
        Session::with_image(RgbaImage::from_pixel(
            width,
            height,
            Rgba([128, 128, 128, 255]),
        ))
    }

    #[test]
    fn test_default_resolution_clamps_to_small_images() {
        let s = session(32, 32);
        assert_eq!(s.resolution(), 32);

        let s = session(512, 512);
        assert_eq!(s.resolution(), 128);
    }

    #[test]
    fn test_res_up_doubles_until_width() {
        let mut s = session(256, 256);
        assert_eq!(s.resolution(), 128);
        assert_eq!(s.res_up().unwrap(), 256);
        assert!(matches!(
            s.res_up(),
            Err(MosaicError::ResolutionOutOfBounds)
        ));
        assert_eq!(s.resolution(), 256);
    }

    #[test]
    fn test_res_down_stops_at_min() {
        // width / height = 4 is the floor
        let mut s = session(64, 16);
        assert_eq!(s.resolution(), 64);
        assert_eq!(s.res_down().unwrap(), 32);
        assert_eq!(s.res_down().unwrap(), 16);
        assert_eq!(s.res_down().unwrap(), 8);
        assert_eq!(s.res_down().unwrap(), 4);
        assert!(matches!(
            s.res_down(),
            Err(MosaicError::ResolutionOutOfBounds)
        ));
        assert_eq!(s.resolution(), 4);
    }

    #[test]
    fn test_resolution_bounds_follow_padded_dims() {
        // 40x1 pads to 64x1; the only legal resolution is 64 and both
        // stepping directions refuse to leave it
        let mut s = session(40, 1);
        assert_eq!(s.resolution(), 64);
        assert!(matches!(s.res_up(), Err(MosaicError::ResolutionOutOfBounds)));
        assert!(matches!(
            s.res_down(),
            Err(MosaicError::ResolutionOutOfBounds)
        ));
        let grid = s.convert().unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].len(), 64);

        // 100x50 pads to 128x64: the default fits, doubling does not
        let mut s = session(100, 50);
        assert_eq!(s.resolution(), 128);
        assert!(matches!(s.res_up(), Err(MosaicError::ResolutionOutOfBounds)));
    }

    #[test]
    fn test_default_charset_is_digits() {
        let s = session(32, 32);
        assert_eq!(s.chars(), DEFAULT_CHARSET);
    }

    #[test]
    fn test_range_edits_either_order() {
        let mut s = session(32, 32);
        s.clear_chars();
        s.add_range('c', 'a');
        assert_eq!(s.chars(), &['a', 'b', 'c']);

        s.remove_range('b', 'a');
        assert_eq!(s.chars(), &['c']);
    }

    #[test]
    fn test_add_all_covers_printable_ascii() {
        let mut s = session(32, 32);
        s.add_all();
        assert_eq!(s.chars().len(), 95);
        assert_eq!(s.chars().first(), Some(&' '));
        assert_eq!(s.chars().last(), Some(&'~'));
    }

    #[test]
    fn test_clear_empties_charset() {
        let mut s = session(32, 32);
        s.clear_chars();
        assert!(s.is_charset_empty());
        assert!(matches!(s.convert(), Err(MosaicError::EmptyCharset)));
    }

    #[test]
    fn test_set_image_failure_keeps_state() {
        let mut s = session(32, 32);
        let before = s.resolution();
        assert!(s.set_image("definitely/not/a/file.png").is_err());
        assert_eq!(s.resolution(), before);
        assert_eq!(s.chars(), DEFAULT_CHARSET);
    }

    #[test]
    fn test_convert_shape_follows_resolution() {
        let mut s = session(32, 32);
        s.add_char('#');
        let grid = s.convert().unwrap();
        assert_eq!(grid.len(), 32);
        assert!(grid.iter().all(|row| row.len() == 32));
    }

    #[test]
    fn test_digits_end_to_end_extremes() {
        let s = session(32, 32);
        let matcher = s.matcher();

        // The extreme queries must land on the digits with the lowest and
        // highest ink density, i.e. the entries keyed 0.0 and 1.0
        let entries = matcher.index().entries();
        let darkest = matcher.glyph_for(0.0).unwrap();
        let brightest = matcher.glyph_for(1.0).unwrap();
        assert_eq!(entries.first(), Some(&(0.0, darkest)));
        assert_eq!(entries.last(), Some(&(1.0, brightest)));
    }
}
